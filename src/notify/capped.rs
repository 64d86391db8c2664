//! Lifetime cap on delivered alerts.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::notify::{Notifier, NotifyError};

/// Wraps a notifier and refuses to send more than `max_messages` alerts.
///
/// Every attempt that passes the cap consumes a slot, whether or not the
/// inner delivery succeeds.
#[derive(Debug)]
pub struct CappedNotifier<N> {
    inner: N,
    max_messages: u32,
    sent: AtomicU32,
}

impl<N> CappedNotifier<N> {
    pub fn new(inner: N, max_messages: u32) -> Self {
        Self {
            inner,
            max_messages,
            sent: AtomicU32::new(0),
        }
    }

    /// Attempts made so far.
    pub fn sent(&self) -> u32 {
        self.sent.load(Ordering::Relaxed)
    }

    pub fn remaining(&self) -> u32 {
        self.max_messages - self.sent()
    }

    fn try_acquire(&self) -> bool {
        let mut prev = self.sent.load(Ordering::Relaxed);
        loop {
            if prev >= self.max_messages {
                return false;
            }
            match self.sent.compare_exchange_weak(
                prev,
                prev + 1,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(x) => prev = x,
            }
        }
    }
}

#[async_trait]
impl<N: Notifier> Notifier for CappedNotifier<N> {
    async fn send(&self, target: &str, message: &str) -> Result<(), NotifyError> {
        if !self.try_acquire() {
            tracing::debug!(max_messages = self.max_messages, "Alert suppressed by message cap");
            return Err(NotifyError::CapReached(self.max_messages));
        }
        self.inner.send(target, message).await
    }
}
