//! Append/drain buffer shared by the probe and digest tasks.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::sampling::sample::Sample;

/// A thread-safe buffer of samples for the current window.
///
/// Cloning shares the same buffer. Appends and drains each hold the lock for
/// a single push or a single buffer swap, so a sample is either in the
/// buffer being detached or in the fresh one, never both and never neither.
#[derive(Debug, Clone, Default)]
pub struct SampleCollector {
    inner: Arc<Mutex<Vec<Sample>>>,
}

impl SampleCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample to the tail of the current window.
    pub fn append(&self, sample: Sample) {
        self.lock().push(sample);
    }

    /// Detach every sample accumulated since the previous drain, in append
    /// order, leaving an empty buffer behind.
    pub fn drain_all(&self) -> Vec<Sample> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sample>> {
        // A panicking writer cannot leave a half-pushed Vec behind.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
