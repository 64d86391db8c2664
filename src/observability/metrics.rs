//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitor_samples_total` (counter): classified probe ticks by status
//! - `monitor_network_reachable` (gauge): 1=reachable, 0=offline
//! - `monitor_digests_total` (counter): non-empty windows digested
//! - `monitor_window_samples` (gauge): samples in the last window
//! - `monitor_availability_rate` (gauge): availability percent of the last window
//! - `monitor_alerts_total` (counter): alert attempts by outcome
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Prometheus exporter serves its own HTTP listener

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::digest::Report;
use crate::sampling::SampleStatus;

/// Install the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_sample(status: SampleStatus) {
    metrics::counter!("monitor_samples_total", "status" => status.as_str()).increment(1);
}

pub fn record_network_reachable(reachable: bool) {
    metrics::gauge!("monitor_network_reachable").set(if reachable { 1.0 } else { 0.0 });
}

pub fn record_digest(report: &Report) {
    metrics::counter!("monitor_digests_total").increment(1);
    metrics::gauge!("monitor_window_samples").set(report.sample_count as f64);
    metrics::gauge!("monitor_availability_rate").set(report.available_rate);
}

/// `outcome` is one of `delivered`, `failed`, `suppressed`.
pub fn record_alert(outcome: &'static str) {
    metrics::counter!("monitor_alerts_total", "outcome" => outcome).increment(1);
}
