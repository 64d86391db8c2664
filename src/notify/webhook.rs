//! JSON webhook delivery.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::NotifierConfig;
use crate::notify::{Notifier, NotifyError};

/// Body POSTed for every alert.
#[derive(Debug, Serialize)]
pub struct AlertPayload<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub target: &'a str,
    pub body: &'a str,
}

/// Posts alerts to an HTTP endpoint (SMS gateway, chat hook, pager).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    recipient: String,
    sender: String,
    auth_token: Option<String>,
}

impl WebhookNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: config.webhook_url.clone(),
            recipient: config.recipient.clone(),
            sender: config.sender.clone(),
            auth_token: config.auth_token.clone(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, target: &str, message: &str) -> Result<(), NotifyError> {
        let payload = AlertPayload {
            to: &self.recipient,
            from: &self.sender,
            target,
            body: message,
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        tracing::info!(recipient = %self.recipient, "Alert delivered");
        Ok(())
    }
}
