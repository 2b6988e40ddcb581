//! Callback-to-future bridge for single-shot device reads.
//!
//! The transport reports a finished read by invoking a callback on a thread it
//! owns. [`begin_read`] turns that into a [`PendingRead`] the report loop can
//! await alongside the shutdown signal.
//!
//! A pending read is a one-shot cell: the first [`ReadCompleter::complete`]
//! call resolves it, every later call is a no-op. This also covers a read that
//! finishes after the loop stopped waiting for it; its result is dropped.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::trace;

use crate::error::TransportError;
use crate::report::ReadOutcome;
use crate::session::DeviceSession;

/// Completion callback handed to the transport for one read.
pub type ReadCallback = Box<dyn FnOnce(ReadOutcome) + Send + 'static>;

/// Awaitable side of a single device read.
///
/// Resolves to [`TransportError::Abandoned`] if every completer is dropped
/// without resolving it.
#[derive(Debug)]
pub struct PendingRead {
    rx: oneshot::Receiver<ReadOutcome>,
}

impl Future for PendingRead {
    type Output = ReadOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(TransportError::Abandoned)))
    }
}

/// Producer side of a [`PendingRead`]. Safe to call from any thread.
#[derive(Debug, Clone)]
pub struct ReadCompleter {
    slot: Arc<Mutex<Option<oneshot::Sender<ReadOutcome>>>>,
}

impl ReadCompleter {
    /// Resolve the pending read.
    ///
    /// Returns `true` only for the call that consumed the cell. A `true`
    /// result does not mean anyone observed the outcome: the waiter may
    /// already have been dropped.
    pub fn complete(&self, outcome: ReadOutcome) -> bool {
        let Some(tx) = self.slot.lock().take() else {
            trace!("ignoring repeated read completion");
            return false;
        };
        if tx.send(outcome).is_err() {
            trace!("read completed after its waiter was dropped");
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.lock().is_none()
    }
}

/// Create an unresolved read cell.
pub fn pending_read() -> (ReadCompleter, PendingRead) {
    let (tx, rx) = oneshot::channel();
    let completer = ReadCompleter {
        slot: Arc::new(Mutex::new(Some(tx))),
    };
    (completer, PendingRead { rx })
}

/// Ask `session` for one read and return the awaitable result.
pub fn begin_read<S>(session: &S) -> PendingRead
where
    S: DeviceSession + ?Sized,
{
    let (completer, pending) = pending_read();
    session.request_read(Box::new(move |outcome| {
        completer.complete(outcome);
    }));
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;

    #[tokio::test]
    async fn test_first_completion_wins() {
        let (completer, pending) = pending_read();
        assert!(completer.complete(Ok(Report::from(vec![0x01]))));
        assert!(!completer.complete(Ok(Report::from(vec![0x02]))));
        assert!(completer.is_resolved());

        assert_eq!(pending.await, Ok(Report::from(vec![0x01])));
    }

    #[tokio::test]
    async fn test_dropped_completer_abandons_read() {
        let (completer, pending) = pending_read();
        drop(completer);
        assert_eq!(pending.await, Err(TransportError::Abandoned));
    }

    #[test]
    fn test_completion_after_waiter_dropped_is_noop() {
        let (completer, pending) = pending_read();
        drop(pending);
        assert!(completer.complete(Err(TransportError::Disconnected)));
        assert!(!completer.complete(Err(TransportError::Disconnected)));
    }

    #[tokio::test]
    async fn test_completion_from_another_thread() {
        let (completer, pending) = pending_read();
        let worker = std::thread::spawn(move || completer.complete(Ok(Report::from(vec![0xAB]))));
        assert_eq!(pending.await, Ok(Report::from(vec![0xAB])));
        assert!(matches!(worker.join(), Ok(true)));
    }
}
