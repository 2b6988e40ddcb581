//! In-memory test doubles for the device seams and console.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::bridge::ReadCallback;
use crate::cancellation::ShutdownController;
use crate::console::Console;
use crate::error::{OpenError, TransportError};
use crate::report::{ReadOutcome, Report};
use crate::session::{DeviceHandle, DeviceLocator, DeviceSession};

/// Scripted response to one `request_read`.
#[derive(Debug)]
pub enum Step {
    /// Complete synchronously inside `request_read`
    Complete(ReadOutcome),
    /// Complete from a freshly spawned thread
    CompleteFromThread(ReadOutcome),
    /// Keep the callback until [`ScriptedSession::complete_held`]
    Hold,
}

impl Step {
    pub fn report(data: Vec<u8>) -> Self {
        Step::Complete(Ok(Report::new(data)))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Step::Complete(Err(TransportError::hid(message)))
    }
}

/// Session that answers reads from a script.
///
/// Once the script is drained further reads are held, and the optional
/// shutdown controller is triggered.
pub struct ScriptedSession {
    steps: Mutex<VecDeque<Step>>,
    held: Mutex<VecDeque<ReadCallback>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    usable: AtomicBool,
    reads_requested: AtomicUsize,
    shutdown_when_drained: Option<ShutdownController>,
}

impl ScriptedSession {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            held: Mutex::new(VecDeque::new()),
            workers: Mutex::new(Vec::new()),
            usable: AtomicBool::new(true),
            reads_requested: AtomicUsize::new(0),
            shutdown_when_drained: None,
        }
    }

    pub fn shutdown_when_drained(mut self, shutdown: ShutdownController) -> Self {
        self.shutdown_when_drained = Some(shutdown);
        self
    }

    pub fn set_usable(&self, usable: bool) {
        self.usable.store(usable, Ordering::SeqCst);
    }

    pub fn reads_requested(&self) -> usize {
        self.reads_requested.load(Ordering::SeqCst)
    }

    pub fn held_reads(&self) -> usize {
        self.held.lock().len()
    }

    /// Invoke the oldest held callback. Returns `false` if none was held.
    pub fn complete_held(&self, outcome: ReadOutcome) -> bool {
        let callback = self.held.lock().pop_front();
        match callback {
            Some(callback) => {
                callback(outcome);
                true
            }
            None => false,
        }
    }

    /// Wait for every `CompleteFromThread` worker to finish.
    pub fn join_workers(&self) {
        let workers: Vec<_> = self.workers.lock().drain(..).collect();
        for worker in workers {
            if worker.join().is_err() {
                tracing::warn!("scripted completion thread panicked");
            }
        }
    }
}

impl DeviceSession for ScriptedSession {
    fn request_read(&self, on_done: ReadCallback) {
        self.reads_requested.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().pop_front();
        match step {
            Some(Step::Complete(outcome)) => on_done(outcome),
            Some(Step::CompleteFromThread(outcome)) => {
                let worker = std::thread::spawn(move || on_done(outcome));
                self.workers.lock().push(worker);
            }
            Some(Step::Hold) => self.held.lock().push_back(on_done),
            None => {
                self.held.lock().push_back(on_done);
                if let Some(shutdown) = &self.shutdown_when_drained {
                    shutdown.request_shutdown();
                }
            }
        }
    }

    fn is_usable(&self) -> bool {
        self.usable.load(Ordering::SeqCst)
    }
}

/// Locator over a fixed device list that hands out one prepared session.
pub struct MockLocator {
    devices: Vec<DeviceHandle>,
    session: Mutex<Option<Result<Arc<ScriptedSession>, OpenError>>>,
}

impl MockLocator {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            session: Mutex::new(None),
        }
    }

    pub fn with_device(mut self, device: DeviceHandle) -> Self {
        self.devices.push(device);
        self
    }

    pub fn with_session(self, session: Arc<ScriptedSession>) -> Self {
        *self.session.lock() = Some(Ok(session));
        self
    }

    pub fn with_open_error(self, error: OpenError) -> Self {
        *self.session.lock() = Some(Err(error));
        self
    }
}

impl Default for MockLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLocator for MockLocator {
    type Session = Arc<ScriptedSession>;

    fn devices(&self) -> Vec<DeviceHandle> {
        self.devices.clone()
    }

    fn open(&self, _handle: &DeviceHandle) -> Result<Self::Session, OpenError> {
        self.session.lock().take().unwrap_or(Err(OpenError::Unusable))
    }
}

/// Console that keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Console for RecordingConsole {
    fn line(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}
