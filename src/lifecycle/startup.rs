//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the collaborators (probe client, heartbeat, report log, notifier)
//! - Start the metrics exporter when enabled
//! - Spawn the heartbeat, probe and digest tasks
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The three tasks share only the liveness state and the sample collector
//! - Once spawned, no task error stops the monitor

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::MonitorConfig;
use crate::digest::{AlertPolicy, DigestEngine};
use crate::lifecycle::Shutdown;
use crate::liveness::{DnsHeartbeat, HeartbeatCheck, LivenessMonitor, LivenessState};
use crate::notify::{CappedNotifier, LogNotifier, Notifier, NotifyError, WebhookNotifier};
use crate::observability::metrics;
use crate::report_log::ReportLog;
use crate::sampling::{HttpProbe, ProbeError, ProbeTransport, Prober, SampleCollector};

/// Errors that prevent the monitor from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid target URL '{url}': {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to open report log '{path}': {source}")]
    ReportLog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build probe client: {0}")]
    Probe(#[from] ProbeError),

    #[error("failed to build notifier: {0}")]
    Notifier(#[from] NotifyError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Handle to the running monitor tasks.
pub struct MonitorHandle {
    shutdown: Shutdown,
    liveness: LivenessState,
    collector: SampleCollector,
    tasks: Vec<JoinHandle<()>>,
}

impl MonitorHandle {
    pub fn liveness(&self) -> &LivenessState {
        &self.liveness
    }

    pub fn collector(&self) -> &SampleCollector {
        &self.collector
    }

    /// Signal all three tasks to stop.
    pub fn shutdown(&self) {
        let notified = self.shutdown.trigger();
        tracing::info!(tasks = notified, "Stopping monitor tasks");
    }

    /// Tasks that have not left their loop yet.
    pub fn running_tasks(&self) -> usize {
        self.shutdown.listening()
    }

    /// Wait for every task to leave its loop.
    pub async fn join(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Monitor task ended abnormally");
            }
            tracing::debug!(remaining = self.shutdown.listening(), "Monitor task stopped");
        }
        tracing::info!("Monitor stopped");
    }
}

/// Build the production collaborators from `config` and start the monitor.
pub fn spawn_monitor(config: &MonitorConfig, shutdown: Shutdown) -> Result<MonitorHandle, StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let transport = HttpProbe::new(config.probe.timeout(), config.probe.system_proxy)?;
    let heartbeat = DnsHeartbeat::new(config.heartbeat.timeout());
    let report_log = ReportLog::create(&config.report).map_err(|source| StartupError::ReportLog {
        path: config.report.path.clone(),
        source,
    })?;
    let notifier = build_notifier(config)?;

    spawn_tasks(config, transport, heartbeat, report_log, notifier, shutdown)
}

fn build_notifier(config: &MonitorConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    if !config.notifier.enabled {
        tracing::info!("Alert delivery disabled, alerts will only be logged");
        return Ok(Arc::new(LogNotifier));
    }
    let webhook = WebhookNotifier::new(&config.notifier)?;
    Ok(Arc::new(CappedNotifier::new(webhook, config.notifier.max_messages)))
}

/// Start the heartbeat, probe and digest tasks with the given collaborators.
pub fn spawn_tasks<T, H, W>(
    config: &MonitorConfig,
    transport: T,
    heartbeat: H,
    report_log: ReportLog<W>,
    notifier: Arc<dyn Notifier>,
    shutdown: Shutdown,
) -> Result<MonitorHandle, StartupError>
where
    T: ProbeTransport + 'static,
    H: HeartbeatCheck + 'static,
    W: Write + Send + 'static,
{
    let target = config.target.url.trim();
    let url = Url::parse(target).map_err(|source| StartupError::InvalidTarget {
        url: target.to_string(),
        source,
    })?;

    let collector = SampleCollector::new();
    let liveness_monitor = LivenessMonitor::new(heartbeat, &config.heartbeat);
    let liveness = liveness_monitor.state();

    let prober = Prober::new(
        transport,
        url.clone(),
        config.probe.interval(),
        liveness.clone(),
        collector.clone(),
    );

    let engine = DigestEngine::new(
        collector.clone(),
        report_log,
        AlertPolicy::from_config(&config.alert),
        notifier,
        url.as_str(),
        config.digest.interval(),
    )
    .map_err(|source| StartupError::ReportLog {
        path: config.report.path.clone(),
        source,
    })?;

    let tasks = vec![
        tokio::spawn(liveness_monitor.run(shutdown.subscribe())),
        tokio::spawn(prober.run(shutdown.subscribe())),
        tokio::spawn(engine.run(shutdown.subscribe())),
    ];

    tracing::info!(target_url = %url, "Monitor started");

    Ok(MonitorHandle {
        shutdown,
        liveness,
        collector,
        tasks,
    })
}
