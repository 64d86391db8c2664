//! Stop signal shared by the heartbeat, sampling and digest tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// One-shot stop signal for the monitor tasks.
///
/// Each task subscribes before it is spawned and leaves its loop when the
/// signal arrives; its receiver is dropped with it, so
/// [`Shutdown::listening`] counts the tasks that have not exited yet.
/// In-flight target requests and alert deliveries are abandoned. Clones share
/// the same signal.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal every subscribed task and return how many were listening.
    /// Only the first call sends; later calls return 0.
    pub fn trigger(&self) -> usize {
        if self.triggered.swap(true, Ordering::AcqRel) {
            return 0;
        }
        self.tx.send(()).unwrap_or(0)
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    /// Tasks still holding a receiver.
    pub fn listening(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
