//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the availability monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// The endpoint being monitored.
    pub target: TargetConfig,

    /// Probe loop settings.
    pub probe: ProbeConfig,

    /// Digest (aggregation) loop settings.
    pub digest: DigestConfig,

    /// Network liveness heartbeat settings.
    pub heartbeat: HeartbeatConfig,

    /// Alert policy settings.
    pub alert: AlertConfig,

    /// Delimited report log settings.
    pub report: ReportConfig,

    /// Outbound alert delivery settings.
    pub notifier: NotifierConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// The monitored endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TargetConfig {
    /// URL receiving one GET per probe tick.
    pub url: String,
}

/// Probe loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe interval in milliseconds.
    pub interval_ms: u64,

    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,

    /// Honour HTTP(S)_PROXY environment variables for probe requests.
    pub system_proxy: bool,
}

impl ProbeConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1200,
            timeout_ms: 1000,
            system_proxy: true,
        }
    }
}

/// Digest loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Digest interval in seconds.
    pub interval_secs: u64,
}

impl DigestConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self { interval_secs: 15 }
    }
}

/// Heartbeat (global reachability) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Stable, always-up reference host to resolve.
    pub host: String,

    /// Heartbeat interval in milliseconds.
    pub interval_ms: u64,

    /// Resolution timeout in milliseconds.
    pub timeout_ms: u64,

    /// Ticks counted down before a trip decision is evaluated.
    pub max_failures: u32,
}

impl HeartbeatConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            host: "google.com".to_string(),
            interval_ms: 200,
            timeout_ms: 150,
            max_failures: 3,
        }
    }
}

/// Which side of the threshold raises an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    /// Alert when the availability rate drops below the threshold.
    #[default]
    Below,
    /// Alert when the availability rate rises above the threshold.
    Above,
}

/// Alert policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Availability rate threshold, in percent.
    pub threshold_percent: f64,

    /// Comparison direction.
    pub direction: AlertDirection,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 70.0,
            direction: AlertDirection::Below,
        }
    }
}

/// Report log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File receiving one delimited row per digest. Truncated on startup.
    pub path: String,

    /// Field delimiter.
    pub delimiter: String,

    /// Echo every row to stdout.
    pub verbose: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: "http.log".to_string(),
            delimiter: "\t".to_string(),
            verbose: true,
        }
    }
}

/// Alert delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Deliver alerts through the webhook. When false, alerts are only logged.
    pub enabled: bool,

    /// Endpoint receiving a JSON POST per alert.
    pub webhook_url: String,

    /// Alert recipient (phone number, channel, address).
    pub recipient: String,

    /// Sender identity passed along with the message.
    pub sender: String,

    /// Optional bearer token for the webhook.
    pub auth_token: Option<String>,

    /// Maximum number of alerts sent over the process lifetime.
    pub max_messages: u32,

    /// Delivery timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: String::new(),
            recipient: String::new(),
            sender: String::new(),
            auth_token: None,
            max_messages: 6,
            timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
