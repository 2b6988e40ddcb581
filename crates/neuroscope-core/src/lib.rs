//! Core of the Neuroscope HID report reader.
//!
//! The transport delivers each read through a completion callback on a thread
//! it owns. [`bridge`] turns that callback into a future, [`ShutdownController`]
//! carries the operator's stop request, and [`ReportLoop`] races the two on
//! every iteration so that shutdown is prompt and no report is processed
//! twice.
//!
//! Device discovery and the transport itself stay behind the
//! [`DeviceLocator`] and [`DeviceSession`] traits; `neuroscope-hid` implements
//! them on top of `hidapi`, and [`mock`] provides in-memory doubles.
//!
//! # Example
//!
//! ```
//! use neuroscope_core::mock::{MockLocator, RecordingConsole};
//! use neuroscope_core::{ReaderConfig, RunOutcome, ShutdownController, run};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), neuroscope_core::ReaderError> {
//! let console = RecordingConsole::new();
//! let outcome = run(
//!     &MockLocator::new(),
//!     &ReaderConfig::default(),
//!     ShutdownController::new(),
//!     &console,
//! )
//! .await?;
//!
//! assert_eq!(outcome, RunOutcome::DeviceNotFound);
//! assert_eq!(
//!     console.lines(),
//!     ["No device connected (VendorId=0x049A, ProductId=0x0005)"]
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod bridge;
pub mod cancellation;
pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod mock;
pub mod report;
pub mod report_loop;
pub mod run;
pub mod session;

pub use bridge::{PendingRead, ReadCallback, ReadCompleter, begin_read, pending_read};
pub use cancellation::ShutdownController;
pub use config::{MAX_REPORT_LENGTH, ReaderConfig};
pub use console::{Console, ConsoleEvent, StdoutConsole};
pub use error::{ConfigError, OpenError, ReaderError, TransportError};
pub use format::format_report;
pub use report::{ReadOutcome, Report};
pub use report_loop::{LoopState, LoopSummary, ReportLoop};
pub use run::{RunOutcome, run};
pub use session::{DeviceHandle, DeviceLocator, DeviceSession};
