//! Liveness monitor and the reachability state it owns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::config::HeartbeatConfig;
use crate::liveness::counter::{CounterTick, FailureToleranceCounter};
use crate::liveness::heartbeat::HeartbeatCheck;
use crate::observability::metrics;

/// Process-wide "do we have a usable network path" flag.
///
/// Cloning shares the same flag. Only [`LivenessMonitor`] writes it; every
/// other holder reads.
#[derive(Debug, Clone)]
pub struct LivenessState {
    reachable: Arc<AtomicBool>,
}

impl LivenessState {
    /// Starts out reachable.
    pub fn new() -> Self {
        Self {
            reachable: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_globally_reachable(&self) -> bool {
        self.reachable.load(Ordering::Acquire)
    }

    /// Returns the previous value.
    fn set(&self, reachable: bool) -> bool {
        self.reachable.swap(reachable, Ordering::AcqRel)
    }
}

impl Default for LivenessState {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic heartbeat deciding global reachability.
pub struct LivenessMonitor<H> {
    heartbeat: H,
    host: String,
    interval: Duration,
    counter: FailureToleranceCounter,
    state: LivenessState,
}

impl<H: HeartbeatCheck> LivenessMonitor<H> {
    pub fn new(heartbeat: H, config: &HeartbeatConfig) -> Self {
        Self {
            heartbeat,
            host: config.host.clone(),
            interval: config.interval(),
            counter: FailureToleranceCounter::new(config.max_failures),
            state: LivenessState::new(),
        }
    }

    /// Read handle for the state this monitor writes.
    pub fn state(&self) -> LivenessState {
        self.state.clone()
    }

    pub fn is_globally_reachable(&self) -> bool {
        self.state.is_globally_reachable()
    }

    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            host = %self.host,
            interval_ms = self.interval.as_millis() as u64,
            max_failures = self.counter.capacity(),
            "Liveness monitor starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Liveness monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run one heartbeat check and fold its outcome into the state.
    pub async fn tick(&mut self) -> bool {
        let ok = match self.heartbeat.check_reachable(&self.host).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Heartbeat check failed");
                false
            }
        };
        self.record(ok)
    }

    /// Fold one heartbeat outcome into the state and return the new state.
    ///
    /// Only the outcome of a trip-decision tick can mark the network
    /// unreachable; pending ticks mark it reachable, so failures earlier in
    /// the countdown do not accumulate. A successful decision restarts the
    /// countdown. A failed one leaves it exhausted, so the state stays
    /// unreachable until a heartbeat succeeds.
    pub fn record(&mut self, ok: bool) -> bool {
        let reachable = match self.counter.tick() {
            CounterTick::Pending { .. } => true,
            CounterTick::TripDecision => {
                if ok {
                    self.counter.reset();
                }
                ok
            }
        };

        let previous = self.state.set(reachable);
        if previous != reachable {
            if reachable {
                tracing::info!(host = %self.host, "Network reachable");
            } else {
                tracing::warn!(host = %self.host, "Network unreachable");
            }
        }
        metrics::record_network_reachable(reachable);

        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liveness::heartbeat::HeartbeatError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedHeartbeat {
        outcomes: Mutex<VecDeque<bool>>,
    }

    impl ScriptedHeartbeat {
        fn new(outcomes: &[bool]) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.iter().copied().collect()),
            }
        }
    }

    #[async_trait]
    impl HeartbeatCheck for ScriptedHeartbeat {
        async fn check_reachable(&self, host: &str) -> Result<(), HeartbeatError> {
            let ok = self.outcomes.lock().unwrap().pop_front().unwrap_or(true);
            if ok {
                Ok(())
            } else {
                Err(HeartbeatError::NoAddresses {
                    host: host.to_string(),
                })
            }
        }
    }

    fn monitor(outcomes: &[bool], max_failures: u32) -> LivenessMonitor<ScriptedHeartbeat> {
        let config = HeartbeatConfig {
            max_failures,
            ..HeartbeatConfig::default()
        };
        LivenessMonitor::new(ScriptedHeartbeat::new(outcomes), &config)
    }

    #[test]
    fn test_starts_reachable() {
        let monitor = monitor(&[], 3);
        assert!(monitor.is_globally_reachable());
    }

    #[tokio::test]
    async fn test_only_decision_tick_can_trip() {
        // Ticks 1-3 are pre-exhaustion and are discarded; tick 4 decides.
        let mut monitor = monitor(&[false, false, false, false], 3);
        let states = [
            monitor.tick().await,
            monitor.tick().await,
            monitor.tick().await,
            monitor.tick().await,
        ];
        assert_eq!(states, [true, true, true, false]);
        assert!(!monitor.is_globally_reachable());
    }

    #[tokio::test]
    async fn test_earlier_failures_do_not_accumulate() {
        let mut monitor = monitor(&[false, false, false, true], 3);
        for _ in 0..4 {
            monitor.tick().await;
        }
        assert!(monitor.is_globally_reachable());
    }

    #[tokio::test]
    async fn test_single_failure_on_decision_tick_trips() {
        let mut monitor = monitor(&[true, true, true, false], 3);
        for _ in 0..4 {
            monitor.tick().await;
        }
        assert!(!monitor.is_globally_reachable());
    }

    #[test]
    fn test_sustained_failure_stays_unreachable() {
        let mut monitor = monitor(&[], 3);
        let states: Vec<bool> = (0..12).map(|_| monitor.record(false)).collect();
        let mut expected = vec![true; 3];
        expected.extend([false; 9]);
        assert_eq!(states, expected);
        assert!(!monitor.is_globally_reachable());
    }

    #[test]
    fn test_success_restores_reachable_and_restarts_countdown() {
        let mut monitor = monitor(&[], 3);
        for _ in 0..6 {
            monitor.record(false);
        }
        assert!(!monitor.is_globally_reachable());

        assert!(monitor.record(true));
        assert_eq!(monitor.counter.remaining(), 3);

        // A fresh countdown discards the next failures again.
        let states: Vec<bool> = (0..4).map(|_| monitor.record(false)).collect();
        assert_eq!(states, [true, true, true, false]);
    }

    #[test]
    fn test_state_handle_observes_monitor() {
        let mut monitor = monitor(&[], 1);
        let state = monitor.state();
        monitor.record(false);
        assert!(state.is_globally_reachable());
        monitor.record(false);
        assert!(!state.is_globally_reachable());
    }
}
