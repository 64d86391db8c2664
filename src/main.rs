//! Availability monitor (v1)
//!
//! Probes one target endpoint on a fixed cadence, tells "target down" apart
//! from "we are offline" with an independent heartbeat, digests the samples
//! into per-window rates and alerts when the availability rate crosses a
//! threshold.
//!
//! # Architecture Overview
//!
//! ```text
//!   heartbeat timer              probe timer                  digest timer
//!  ┌────────────────┐        ┌────────────────┐          ┌──────────────────┐
//!  │ LivenessMonitor│─state─▶│     Prober     │─samples─▶│   DigestEngine   │
//!  │  DNS + counter │        │ GET + classify │  (Sample │ drain → Report   │
//!  └────────────────┘        └────────────────┘ Collector)│ → log → policy  │
//!                                                         └────────┬─────────┘
//!                                                                  ▼
//!                                                             Notifier
//! ```

use std::path::PathBuf;

use clap::Parser;

use availability_monitor::config::{load_config, validate_config, ConfigError, MonitorConfig};
use availability_monitor::lifecycle::{signals, spawn_monitor, Shutdown};
use availability_monitor::observability::logging;

#[derive(Parser)]
#[command(name = "availability-monitor")]
#[command(about = "Probe an endpoint and alert on its availability rate", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target URL, overriding `target.url` from the configuration.
    #[arg(short, long)]
    url: Option<String>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

fn resolve_config(cli: &Cli) -> Result<MonitorConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            // A --url override may fix the only problem with the file.
            Err(ConfigError::Validation(_)) if cli.url.is_some() => {
                let content = std::fs::read_to_string(path)?;
                availability_monitor::config::loader::parse_config(&content)?
            }
            other => other?,
        },
        None => MonitorConfig::default(),
    };

    if let Some(url) = &cli.url {
        config.target.url = url.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability);

    if cli.check {
        println!("Configuration OK");
        return Ok(());
    }

    tracing::info!(
        target_url = %config.target.url,
        probe_interval_ms = config.probe.interval_ms,
        digest_interval_secs = config.digest.interval_secs,
        heartbeat_host = %config.heartbeat.host,
        threshold = config.alert.threshold_percent,
        "availability-monitor v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let shutdown = Shutdown::new();
    let monitor = spawn_monitor(&config, shutdown)?;

    signals::wait_for_signal().await;
    tracing::info!("Shutting down");
    monitor.shutdown();
    monitor.join().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
