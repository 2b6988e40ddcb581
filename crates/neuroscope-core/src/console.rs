//! Operator-facing output lines.
//!
//! Each [`ConsoleEvent`] renders to exactly one stdout line. Diagnostics go
//! through `tracing` instead and never share this channel.

use std::fmt;
use std::io::Write as _;

use tracing::warn;

use crate::error::TransportError;
use crate::format::format_report;

/// One line of operator output.
#[derive(Clone, Copy)]
pub enum ConsoleEvent<'a> {
    DeviceFound,
    NoDevice { vendor_id: u16, product_id: u16 },
    OpenFailed,
    /// Payload already truncated to the configured report length
    Received(&'a [u8]),
    EmptyReport,
    ReadError(&'a TransportError),
    Stopping,
    Unexpected(&'a dyn fmt::Display),
}

impl fmt::Display for ConsoleEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleEvent::DeviceFound => write!(f, "Device found."),
            ConsoleEvent::NoDevice {
                vendor_id,
                product_id,
            } => write!(
                f,
                "No device connected (VendorId=0x{vendor_id:04X}, ProductId=0x{product_id:04X})"
            ),
            ConsoleEvent::OpenFailed => write!(f, "Failed to open device."),
            ConsoleEvent::Received(bytes) => write!(f, "Received: {}", format_report(bytes)),
            ConsoleEvent::EmptyReport => write!(f, "Received empty or invalid report."),
            ConsoleEvent::ReadError(err) => write!(f, "Error during reading report: {err}"),
            ConsoleEvent::Stopping => write!(f, "Stopping..."),
            ConsoleEvent::Unexpected(err) => write!(f, "Unexpected error: {err}"),
        }
    }
}

/// Sink for operator output lines.
pub trait Console: Send + Sync {
    fn line(&self, text: &str);

    fn emit(&self, event: ConsoleEvent<'_>) {
        self.line(&event.to_string());
    }
}

/// Writes lines to the process stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            warn!(error = %e, "failed to write to stdout");
        }
    }
}
