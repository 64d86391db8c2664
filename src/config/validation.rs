//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, threshold within 0..=100)
//! - Check that the target and webhook URLs are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::MonitorConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(message) = check_http_url(&config.target.url) {
        errors.push(ValidationError::new("target.url", message));
    }

    if config.probe.interval_ms == 0 {
        errors.push(ValidationError::new("probe.interval_ms", "must be greater than 0"));
    }
    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::new("probe.timeout_ms", "must be greater than 0"));
    }
    if config.digest.interval_secs == 0 {
        errors.push(ValidationError::new("digest.interval_secs", "must be greater than 0"));
    }

    let heartbeat = &config.heartbeat;
    if heartbeat.host.trim().is_empty() {
        errors.push(ValidationError::new("heartbeat.host", "must not be empty"));
    }
    if heartbeat.interval_ms == 0 {
        errors.push(ValidationError::new("heartbeat.interval_ms", "must be greater than 0"));
    }
    if heartbeat.timeout_ms == 0 || heartbeat.timeout_ms >= heartbeat.interval_ms {
        errors.push(ValidationError::new(
            "heartbeat.timeout_ms",
            format!(
                "must be greater than 0 and less than heartbeat.interval_ms ({})",
                heartbeat.interval_ms
            ),
        ));
    }
    if heartbeat.max_failures == 0 {
        errors.push(ValidationError::new("heartbeat.max_failures", "must be at least 1"));
    }

    let threshold = config.alert.threshold_percent;
    if !(0.0..=100.0).contains(&threshold) {
        errors.push(ValidationError::new(
            "alert.threshold_percent",
            format!("{} is outside 0..=100", threshold),
        ));
    }

    if config.report.delimiter.is_empty() {
        errors.push(ValidationError::new("report.delimiter", "must not be empty"));
    }
    if config.report.path.trim().is_empty() {
        errors.push(ValidationError::new("report.path", "must not be empty"));
    }

    let notifier = &config.notifier;
    if notifier.enabled {
        if let Err(message) = check_http_url(&notifier.webhook_url) {
            errors.push(ValidationError::new("notifier.webhook_url", message));
        }
        if notifier.recipient.trim().is_empty() {
            errors.push(ValidationError::new("notifier.recipient", "must not be empty"));
        }
        if notifier.timeout_secs == 0 {
            errors.push(ValidationError::new("notifier.timeout_secs", "must be greater than 0"));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    if raw.trim().is_empty() {
        return Err("must be set".to_string());
    }
    let url = Url::parse(raw.trim()).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
