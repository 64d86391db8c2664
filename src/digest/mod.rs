//! Windowed aggregation and alerting.
//!
//! # Data Flow
//! ```text
//! Digest timer (engine.rs):
//!     SampleCollector::drain_all
//!     → empty? stop
//!     → report.rs (counts, rates, row fields)
//!     → ReportLog (one delimited row)
//!     → alert.rs (threshold + direction)
//!     → Notifier (when the policy fires)
//! ```
//!
//! # Design Decisions
//! - Stateless per window; repeated alerts are only limited by the notifier cap
//! - The engine touches in-memory state only, apart from alert delivery

pub mod alert;
pub mod engine;
pub mod report;

pub use alert::AlertPolicy;
pub use engine::{DigestEngine, DigestOutcome};
pub use report::{Report, REPORT_HEADER};
