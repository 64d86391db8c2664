//! Sampling subsystem.
//!
//! # Data Flow
//! ```text
//! Probe timer (prober.rs):
//!     LivenessState unreachable? → Offline
//!     else GET target → 2xx ? Available : Unavailable
//!     → collector.rs (append)
//!
//! Digest timer:
//!     collector.rs drain_all → one window of samples
//! ```
//!
//! # Design Decisions
//! - Exactly one classification per tick, no retries
//! - The sample buffer is the only state shared between the probe and digest tasks
//! - Drains swap the whole buffer out under the lock

pub mod collector;
pub mod prober;
pub mod sample;

pub use collector::SampleCollector;
pub use prober::{HttpProbe, ProbeError, ProbeResponse, ProbeTransport, Prober};
pub use sample::{Sample, SampleStatus};
