//! Target probing and classification.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};
use url::Url;

use crate::liveness::LivenessState;
use crate::observability::metrics;
use crate::sampling::collector::SampleCollector;
use crate::sampling::sample::{Sample, SampleStatus};

/// Errors that prevent a probe from producing a response.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe request failed: {0}")]
    Transport(String),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
}

/// What the target answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
}

impl ProbeResponse {
    /// Any 2xx answer counts as available, not only 200. Redirects are
    /// followed by the client, so a 3xx seen here is a failure.
    pub fn status_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one GET to the target.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    async fn probe(&self, url: &Url) -> Result<ProbeResponse, ProbeError>;
}

/// Probe transport backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration, system_proxy: bool) -> Result<Self, ProbeError> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("availability-monitor/", env!("CARGO_PKG_VERSION")));
        if !system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl ProbeTransport for HttpProbe {
    async fn probe(&self, url: &Url) -> Result<ProbeResponse, ProbeError> {
        match self.client.get(url.clone()).send().await {
            Ok(response) => Ok(ProbeResponse {
                status: response.status().as_u16(),
            }),
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout(self.timeout)),
            Err(e) => Err(ProbeError::Transport(e.to_string())),
        }
    }
}

/// One probe attempt per tick, classified and appended to the collector.
pub struct Prober<T> {
    transport: T,
    url: Url,
    interval: Duration,
    liveness: LivenessState,
    collector: SampleCollector,
}

impl<T: ProbeTransport> Prober<T> {
    pub fn new(
        transport: T,
        url: Url,
        interval: Duration,
        liveness: LivenessState,
        collector: SampleCollector,
    ) -> Self {
        Self {
            transport,
            url,
            interval,
            liveness,
            collector,
        }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            url = %self.url,
            interval_ms = self.interval.as_millis() as u64,
            "Prober starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Prober received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Classify one probe attempt and append it.
    pub async fn tick(&self) -> Sample {
        let status = self.classify().await;
        metrics::record_sample(status);
        let sample = Sample::now(status);
        self.collector.append(sample);
        sample
    }

    async fn classify(&self) -> SampleStatus {
        // Offline overrides whatever the target would have answered.
        if !self.liveness.is_globally_reachable() {
            return SampleStatus::Offline;
        }

        match self.transport.probe(&self.url).await {
            Ok(response) if response.status_ok() => SampleStatus::Available,
            Ok(response) => {
                tracing::debug!(url = %self.url, status = response.status, "Probe failed: non-success status");
                SampleStatus::Unavailable
            }
            Err(e) => {
                tracing::debug!(url = %self.url, error = %e, "Probe failed");
                SampleStatus::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeartbeatConfig;
    use crate::liveness::{HeartbeatCheck, HeartbeatError, LivenessMonitor};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays scripted outcomes: `Some(status)` answers, `None` fails.
    struct ScriptedTransport {
        outcomes: Mutex<VecDeque<Option<u16>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(outcomes: &[Option<u16>]) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.iter().copied().collect()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProbeTransport for ScriptedTransport {
        async fn probe(&self, _url: &Url) -> Result<ProbeResponse, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcomes.lock().unwrap().pop_front().flatten() {
                Some(status) => Ok(ProbeResponse { status }),
                None => Err(ProbeError::Transport("connection refused".into())),
            }
        }
    }

    struct FailingHeartbeat;

    #[async_trait]
    impl HeartbeatCheck for FailingHeartbeat {
        async fn check_reachable(&self, host: &str) -> Result<(), HeartbeatError> {
            Err(HeartbeatError::NoAddresses {
                host: host.to_string(),
            })
        }
    }

    fn prober(
        outcomes: &[Option<u16>],
        liveness: LivenessState,
    ) -> (Prober<ScriptedTransport>, SampleCollector) {
        let collector = SampleCollector::new();
        let prober = Prober::new(
            ScriptedTransport::new(outcomes),
            Url::parse("http://target.test/").unwrap(),
            Duration::from_secs(1),
            liveness,
            collector.clone(),
        );
        (prober, collector)
    }

    #[test]
    fn test_any_success_status_counts_as_available() {
        for status in [200, 201, 204, 299] {
            assert!(ProbeResponse { status }.status_ok(), "{} should be available", status);
        }
        for status in [199, 301, 304, 404, 503] {
            assert!(!ProbeResponse { status }.status_ok(), "{} should be unavailable", status);
        }
    }

    #[tokio::test]
    async fn test_reachable_samples_are_never_offline() {
        let outcomes = [Some(200), None, Some(503), Some(204), Some(404), None, Some(200)];
        let (prober, collector) = prober(&outcomes, LivenessState::new());
        for _ in 0..outcomes.len() {
            prober.tick().await;
        }

        let batch = collector.drain_all();
        assert_eq!(batch.len(), outcomes.len());
        let count = |status: SampleStatus| batch.iter().filter(|s| s.status == status).count();
        assert_eq!(count(SampleStatus::Offline), 0);
        assert_eq!(count(SampleStatus::Available), 3);
        assert_eq!(count(SampleStatus::Unavailable), 4);
    }

    #[tokio::test]
    async fn test_offline_overrides_probe_outcome() {
        let config = HeartbeatConfig::default();
        let mut monitor = LivenessMonitor::new(FailingHeartbeat, &config);
        for _ in 0..config.max_failures {
            monitor.tick().await;
        }
        assert!(monitor.is_globally_reachable());
        monitor.tick().await;
        assert!(!monitor.is_globally_reachable());

        let (prober, collector) = prober(&[Some(200)], monitor.state());
        let sample = prober.tick().await;

        assert_eq!(sample.status, SampleStatus::Offline);
        assert_eq!(prober.transport.calls.load(Ordering::SeqCst), 0);
        assert_eq!(collector.drain_all(), vec![sample]);
    }
}
