//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Build collaborators → Spawn heartbeat/probe/digest tasks
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Each task leaves its loop → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then collaborators, then tasks
//! - In-flight probes and deliveries are abandoned on shutdown; nothing is persisted

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{spawn_monitor, spawn_tasks, MonitorHandle, StartupError};
