//! Availability monitor library.

pub mod config;
pub mod digest;
pub mod lifecycle;
pub mod liveness;
pub mod notify;
pub mod observability;
pub mod report_log;
pub mod sampling;

pub use config::schema::MonitorConfig;
pub use lifecycle::Shutdown;
