//! Classified probe outcomes.

use std::fmt;

use chrono::{DateTime, Utc};

/// Classification of a single probe tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleStatus {
    /// The target answered with a success status.
    Available,
    /// The target failed to answer, or answered with a non-success status.
    Unavailable,
    /// No usable network path; the target's state is unknown.
    Offline,
}

impl SampleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleStatus::Available => "available",
            SampleStatus::Unavailable => "unavailable",
            SampleStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub status: SampleStatus,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn new(status: SampleStatus, timestamp: DateTime<Utc>) -> Self {
        Self { status, timestamp }
    }

    pub fn now(status: SampleStatus) -> Self {
        Self::new(status, Utc::now())
    }
}
