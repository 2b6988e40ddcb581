//! The report loop.
//!
//! One iteration requests a read, then waits for whichever comes first: the
//! read outcome or the shutdown signal. Shutdown wins when both are ready.
//! A read still outstanding at shutdown is dropped, not drained.
//!
//! ```text
//! Idle ──begin_read──▶ AwaitingRead ──outcome──▶ Processing ──▶ Idle
//!   │                        │
//!   └──── shutdown ──────────┴──────────────────────────────▶ Terminated
//! ```

use tracing::{debug, trace};

use crate::bridge::begin_read;
use crate::cancellation::ShutdownController;
use crate::console::{Console, ConsoleEvent};
use crate::error::ReaderError;
use crate::report::ReadOutcome;
use crate::session::DeviceSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    AwaitingRead,
    Processing,
    Terminated,
}

/// Counters for one loop run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Reads that were started
    pub reads_started: u64,
    /// Non-empty reports printed
    pub reports: u64,
    /// Empty reports
    pub empty_reports: u64,
    /// Transient transport errors
    pub read_errors: u64,
}

pub struct ReportLoop<'a, S: ?Sized> {
    session: &'a S,
    shutdown: ShutdownController,
    console: &'a dyn Console,
    report_length: usize,
    state: LoopState,
    summary: LoopSummary,
}

impl<'a, S> ReportLoop<'a, S>
where
    S: DeviceSession + ?Sized,
{
    pub fn new(
        session: &'a S,
        shutdown: ShutdownController,
        console: &'a dyn Console,
        report_length: usize,
    ) -> Self {
        Self {
            session,
            shutdown,
            console,
            report_length,
            state: LoopState::Idle,
            summary: LoopSummary::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn summary(&self) -> LoopSummary {
        self.summary
    }

    /// Read reports until shutdown is requested.
    ///
    /// Read errors and empty reports are printed and the loop continues.
    ///
    /// # Errors
    ///
    /// [`ReaderError::SessionUnusable`] if the session stops accepting reads.
    pub async fn run(&mut self) -> Result<LoopSummary, ReaderError> {
        while !self.shutdown.is_shutdown_requested() {
            if !self.session.is_usable() {
                self.transition(LoopState::Terminated);
                return Err(ReaderError::SessionUnusable);
            }

            let pending = begin_read(self.session);
            self.summary.reads_started = self.summary.reads_started.saturating_add(1);
            self.transition(LoopState::AwaitingRead);

            let outcome = tokio::select! {
                biased;
                () = self.shutdown.cancelled() => None,
                outcome = pending => Some(outcome),
            };
            let Some(outcome) = outcome else {
                debug!("shutdown observed while awaiting read");
                break;
            };

            self.transition(LoopState::Processing);
            self.process(&outcome);
            self.transition(LoopState::Idle);
        }

        self.transition(LoopState::Terminated);
        Ok(self.summary)
    }

    fn process(&mut self, outcome: &ReadOutcome) {
        match outcome {
            Ok(report) if report.is_empty() => {
                self.summary.empty_reports = self.summary.empty_reports.saturating_add(1);
                debug!("received empty report");
                self.console.emit(ConsoleEvent::EmptyReport);
            }
            Ok(report) => {
                self.summary.reports = self.summary.reports.saturating_add(1);
                trace!(len = report.len(), "received report");
                self.console
                    .emit(ConsoleEvent::Received(report.truncated(self.report_length)));
            }
            Err(err) => {
                self.summary.read_errors = self.summary.read_errors.saturating_add(1);
                debug!(error = %err, "transient read error");
                self.console.emit(ConsoleEvent::ReadError(err));
            }
        }
    }

    fn transition(&mut self, next: LoopState) {
        trace!(from = ?self.state, to = ?next, "report loop transition");
        self.state = next;
    }
}
