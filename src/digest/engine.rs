//! Digest loop: drain, summarise, log, alert.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::digest::alert::AlertPolicy;
use crate::digest::report::{Report, REPORT_HEADER};
use crate::notify::{Notifier, NotifyError};
use crate::observability::metrics;
use crate::report_log::ReportLog;
use crate::sampling::SampleCollector;

/// Result of a digest tick that found samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestOutcome {
    pub report: Report,
    /// The delimited row as written to the report log.
    pub row: String,
    /// Whether the alert policy fired for this window.
    pub alerted: bool,
}

/// Converts each window of samples into a report and an alert decision.
pub struct DigestEngine<W> {
    collector: SampleCollector,
    report_log: ReportLog<W>,
    policy: AlertPolicy,
    notifier: Arc<dyn Notifier>,
    target: String,
    interval: Duration,
}

impl<W: Write + Send> DigestEngine<W> {
    /// Create the engine and write the report header.
    pub fn new(
        collector: SampleCollector,
        report_log: ReportLog<W>,
        policy: AlertPolicy,
        notifier: Arc<dyn Notifier>,
        target: impl Into<String>,
        interval: Duration,
    ) -> io::Result<Self> {
        report_log.log(&REPORT_HEADER)?;

        Ok(Self {
            collector,
            report_log,
            policy,
            notifier,
            target: target.into(),
            interval,
        })
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            threshold = self.policy.threshold(),
            direction = ?self.policy.direction(),
            "Digest engine starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Digest engine received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Digest everything collected since the previous tick.
    ///
    /// An empty window is a no-op: no row, no alert evaluation.
    pub async fn tick(&self) -> Option<DigestOutcome> {
        let batch = self.collector.drain_all();
        let report = Report::from_batch(&batch)?;

        let row = self.report_log.format_row(&report.fields(&self.target));
        if let Err(e) = self.report_log.write_line(&row) {
            tracing::error!(error = %e, "Failed to write report row");
        }
        metrics::record_digest(&report);

        let alerted = self.policy.should_alert(report.available_rate);
        if alerted {
            tracing::warn!(
                target_url = %self.target,
                available_rate = report.available_rate,
                threshold = self.policy.threshold(),
                "Availability threshold crossed"
            );
            self.notify(&row).await;
        }

        Some(DigestOutcome {
            report,
            row,
            alerted,
        })
    }

    async fn notify(&self, row: &str) {
        match self.notifier.send(&self.target, row).await {
            Ok(()) => metrics::record_alert("delivered"),
            Err(NotifyError::CapReached(max)) => {
                tracing::debug!(max_messages = max, "Alert not sent: message cap reached");
                metrics::record_alert("suppressed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to deliver alert");
                metrics::record_alert("failed");
            }
        }
    }
}
