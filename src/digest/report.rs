//! Per-window availability report.

use chrono::{DateTime, Local, Utc};

use crate::sampling::{Sample, SampleStatus};

/// Column names of the report log, written once before the first row.
pub const REPORT_HEADER: [&str; 7] = [
    "WINDOW START",
    "WINDOW END",
    "URL",
    "SAMPLES",
    "OFFLINE RATE (%)",
    "FAILURE RATE (%)",
    "SUCCESS RATE (%)",
];

/// Aggregate statistics for one drained window.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub sample_count: usize,
    pub offline_count: usize,
    pub unavailable_count: usize,
    pub available_count: usize,
    pub offline_rate: f64,
    pub unavailable_rate: f64,
    pub available_rate: f64,
}

impl Report {
    /// Summarise a batch in append order. Returns `None` for an empty batch.
    pub fn from_batch(batch: &[Sample]) -> Option<Self> {
        let first = batch.first()?;
        let last = batch.last()?;

        let (mut offline, mut unavailable, mut available) = (0, 0, 0);
        for sample in batch {
            match sample.status {
                SampleStatus::Offline => offline += 1,
                SampleStatus::Unavailable => unavailable += 1,
                SampleStatus::Available => available += 1,
            }
        }

        let total = batch.len();
        let rate = |count: usize| count as f64 / total as f64 * 100.0;

        Some(Self {
            window_start: first.timestamp,
            window_end: last.timestamp,
            sample_count: total,
            offline_count: offline,
            unavailable_count: unavailable,
            available_count: available,
            offline_rate: rate(offline),
            unavailable_rate: rate(unavailable),
            available_rate: rate(available),
        })
    }

    /// Row fields matching [`REPORT_HEADER`]. Rates carry two decimals.
    pub fn fields(&self, target: &str) -> [String; 7] {
        [
            local_time(self.window_start),
            local_time(self.window_end),
            target.to_string(),
            self.sample_count.to_string(),
            format!("{:.2}", self.offline_rate),
            format!("{:.2}", self.unavailable_rate),
            format!("{:.2}", self.available_rate),
        ]
    }
}

fn local_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}
