//! Threaded read transport.
//!
//! A [`HidSession`] owns one worker thread that owns the device. Read
//! requests arrive over a channel; each is served by polling
//! `read_timeout` until data, an error, or session close, and the callback
//! runs on the worker thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, SendError, Sender};
use neuroscope_core::{DeviceSession, ReadCallback, ReadOutcome, Report, TransportError};
use tracing::{debug, trace, warn};

/// Poll interval for both the request channel and device reads.
pub const POLL_INTERVAL_MS: i32 = 100;

/// Pause after a failed read before serving the next request.
pub const ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Blocking input source with a read timeout.
///
/// `Ok(0)` means the timeout elapsed without data.
pub trait InputReader: Send + 'static {
    fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize, String>;
}

impl InputReader for hidapi::HidDevice {
    fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize, String> {
        hidapi::HidDevice::read_timeout(self, buf, timeout_ms).map_err(|e| e.to_string())
    }
}

/// Open device session backed by a reader thread.
///
/// Dropping it stops the thread and closes the device. A read in flight at
/// that moment is abandoned.
pub struct HidSession {
    name: String,
    requests: Option<Sender<ReadCallback>>,
    open: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl HidSession {
    /// Start the reader thread for `reader`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn<R: InputReader>(
        reader: R,
        name: impl Into<String>,
        buffer_len: usize,
    ) -> std::io::Result<Self> {
        let name = name.into();
        let (tx, rx) = channel::unbounded();
        let open = Arc::new(AtomicBool::new(true));

        let worker = {
            let open = Arc::clone(&open);
            std::thread::Builder::new()
                .name("neuroscope-hid-reader".to_string())
                .spawn(move || serve_reads(&reader, &rx, &open, buffer_len))?
        };

        debug!(device = %name, "HID reader thread started");
        Ok(Self {
            name,
            requests: Some(tx),
            open,
            worker: Some(worker),
        })
    }
}

impl DeviceSession for HidSession {
    fn request_read(&self, on_done: ReadCallback) {
        let Some(requests) = &self.requests else {
            on_done(Err(TransportError::Disconnected));
            return;
        };
        if let Err(SendError(on_done)) = requests.send(on_done) {
            on_done(Err(TransportError::Disconnected));
        }
    }

    fn is_usable(&self) -> bool {
        self.open.load(Ordering::Acquire)
            && self
                .worker
                .as_ref()
                .is_some_and(|worker| !worker.is_finished())
    }
}

impl Drop for HidSession {
    fn drop(&mut self) {
        self.open.store(false, Ordering::Release);
        self.requests = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(device = %self.name, "HID reader thread panicked");
            }
        }
        debug!(device = %self.name, "HID session closed");
    }
}

fn serve_reads<R: InputReader>(
    reader: &R,
    requests: &Receiver<ReadCallback>,
    open: &AtomicBool,
    buffer_len: usize,
) {
    let mut buf = vec![0u8; buffer_len];
    let poll = Duration::from_millis(POLL_INTERVAL_MS.unsigned_abs().into());

    while open.load(Ordering::Acquire) {
        let on_done = match requests.recv_timeout(poll) {
            Ok(on_done) => on_done,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match read_one(reader, &mut buf, open) {
            Some(outcome) => {
                let failed = outcome.is_err();
                on_done(outcome);
                if failed {
                    std::thread::sleep(ERROR_BACKOFF);
                }
            }
            None => trace!("session closed with a read in flight"),
        }
    }

    open.store(false, Ordering::Release);
    debug!("HID reader thread stopped");
}

/// Poll until one report or error arrives. `None` if the session closed
/// first.
fn read_one<R: InputReader>(reader: &R, buf: &mut [u8], open: &AtomicBool) -> Option<ReadOutcome> {
    while open.load(Ordering::Acquire) {
        match reader.read_timeout(buf, POLL_INTERVAL_MS) {
            Ok(0) => continue,
            Ok(n) => return Some(Ok(Report::from(buf.get(..n).unwrap_or_default()))),
            Err(message) => return Some(Err(TransportError::Hid(message))),
        }
    }
    None
}
