//! Global network liveness.
//!
//! # Data Flow
//! ```text
//! Heartbeat timer (monitor.rs):
//!     Resolve reference host (heartbeat.rs)
//!     → Advance countdown (counter.rs)
//!     → On trip-decision tick: outcome sets LivenessState,
//!       success restarts the countdown
//!     → On any other tick: LivenessState = reachable
//!
//! Prober:
//!     Reads LivenessState before classifying a probe
//! ```
//!
//! # Design Decisions
//! - Single writer (the monitor task), lock-free reads
//! - Independent of the monitored target, so "we are offline" is never
//!   reported as "target is down"
//! - Only a tick after the countdown is exhausted can trip the state;
//!   failures during the countdown are discarded rather than accumulated
//! - A failed decision keeps the countdown exhausted, so a sustained outage
//!   stays offline on every tick until a heartbeat succeeds

pub mod counter;
pub mod heartbeat;
pub mod monitor;

pub use counter::{CounterTick, FailureToleranceCounter};
pub use heartbeat::{DnsHeartbeat, HeartbeatCheck, HeartbeatError};
pub use monitor::{LivenessMonitor, LivenessState};
