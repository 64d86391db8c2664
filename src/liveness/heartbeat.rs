//! Heartbeat check against a stable reference host.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;

/// Errors from a single heartbeat check.
#[derive(Debug, Error)]
pub enum HeartbeatError {
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("resolution of {host} returned no addresses")]
    NoAddresses { host: String },

    #[error("resolution of {host} timed out after {timeout:?}")]
    Timeout { host: String, timeout: Duration },
}

/// Answers whether a reference host is reachable right now.
#[async_trait]
pub trait HeartbeatCheck: Send + Sync {
    async fn check_reachable(&self, host: &str) -> Result<(), HeartbeatError>;
}

/// Heartbeat that resolves the reference host through the system resolver.
#[derive(Debug, Clone)]
pub struct DnsHeartbeat {
    timeout: Duration,
}

impl DnsHeartbeat {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl HeartbeatCheck for DnsHeartbeat {
    async fn check_reachable(&self, host: &str) -> Result<(), HeartbeatError> {
        let lookup = tokio::net::lookup_host((host, 0));
        match timeout(self.timeout, lookup).await {
            Ok(Ok(mut addrs)) => {
                if addrs.next().is_some() {
                    Ok(())
                } else {
                    Err(HeartbeatError::NoAddresses {
                        host: host.to_string(),
                    })
                }
            }
            Ok(Err(source)) => Err(HeartbeatError::Resolve {
                host: host.to_string(),
                source,
            }),
            Err(_) => Err(HeartbeatError::Timeout {
                host: host.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}
