use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// A cheaply-clonable cooperative cancellation signal (spec.md §5:
/// "Cancellation and timeouts"). Grounded on this workspace's own
/// `ReplayerStatus` shared-atomic-flag pattern (`rollup_fullnode_core::node`),
/// generalized from a read-only status flag into a signal multiple in-flight
/// requests can actually await a wakeup on.
#[derive(Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Fires the signal. Idempotent; every past and future `cancelled()`
    /// waiter observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`Self::cancel`] has been called (immediately, if it
    /// already has been). Capturing the `Notified` future before checking
    /// the flag avoids the missed-wakeup race `notify_waiters` would
    /// otherwise allow between the check and the await.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
