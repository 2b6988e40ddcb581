//! Operator shutdown signal

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

/// Process-scoped, monotonic shutdown signal.
///
/// Clones share the same signal. Once requested it stays requested for the
/// rest of the run.
#[derive(Debug, Clone, Default)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Never blocks and is safe to call from a signal
    /// listener on any thread.
    ///
    /// Returns `true` only for the call that actually set the signal.
    pub fn request_shutdown(&self) -> bool {
        if self.inner.requested.swap(true, Ordering::SeqCst) {
            return false;
        }
        debug!("shutdown requested");
        self.inner.notify.notify_waiters();
        true
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown has been requested.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent request
            // cannot slip between the check and the wait.
            notified.as_mut().enable();
            if self.is_shutdown_requested() {
                return;
            }
            notified.await;
        }
    }
}
