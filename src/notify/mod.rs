//! Outbound alert delivery.
//!
//! # Data Flow
//! ```text
//! DigestEngine (alert decided)
//!     → capped.rs (lifetime message cap)
//!     → webhook.rs (JSON POST) or LogNotifier (log only)
//! ```
//!
//! # Design Decisions
//! - Delivery failures are returned, logged by the caller and never fatal
//! - The cap lives in the notifier, not in the alert policy

pub mod capped;
pub mod webhook;

use async_trait::async_trait;
use thiserror::Error;

pub use capped::CappedNotifier;
pub use webhook::WebhookNotifier;

/// Errors that can occur while delivering an alert.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Transport(String),

    #[error("delivery rejected with status {0}")]
    Rejected(u16),

    #[error("message cap of {0} reached")]
    CapReached(u32),
}

/// Delivers an alert message about a target.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, target: &str, message: &str) -> Result<(), NotifyError>;
}

/// Notifier used when no delivery channel is configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, target: &str, message: &str) -> Result<(), NotifyError> {
        tracing::warn!(target_url = %target, report = %message, "Availability alert");
        Ok(())
    }
}
