//! One reader run: find, open, loop, release.

use tracing::{info, warn};

use crate::cancellation::ShutdownController;
use crate::config::ReaderConfig;
use crate::console::{Console, ConsoleEvent};
use crate::error::ReaderError;
use crate::report_loop::{LoopSummary, ReportLoop};
use crate::session::{DeviceLocator, DeviceSession};

/// How a run ended when nothing unexpected happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No device matched the vendor/product filter
    DeviceNotFound,
    /// A device matched but could not be opened
    OpenFailed,
    /// The loop ran until shutdown was requested
    Stopped(LoopSummary),
}

/// Find the configured device, open it and read reports until shutdown.
///
/// The session is owned by this call and released on every return path.
///
/// # Errors
///
/// Only unanticipated failures are returned; "not found" and "open failed"
/// are [`RunOutcome`] values.
pub async fn run<L>(
    locator: &L,
    config: &ReaderConfig,
    shutdown: ShutdownController,
    console: &dyn Console,
) -> Result<RunOutcome, ReaderError>
where
    L: DeviceLocator + ?Sized,
{
    config.validate()?;

    let Some(handle) = locator.find_device(config.vendor_id, config.product_id) else {
        console.emit(ConsoleEvent::NoDevice {
            vendor_id: config.vendor_id,
            product_id: config.product_id,
        });
        return Ok(RunOutcome::DeviceNotFound);
    };

    console.emit(ConsoleEvent::DeviceFound);
    info!(
        device = %handle.display_name(),
        path = %handle.path,
        "device found"
    );

    let session = match locator.open(&handle) {
        Ok(session) if session.is_usable() => session,
        Ok(_) => {
            warn!("device opened but session is not usable");
            console.emit(ConsoleEvent::OpenFailed);
            return Ok(RunOutcome::OpenFailed);
        }
        Err(e) => {
            warn!(error = %e, "failed to open device");
            console.emit(ConsoleEvent::OpenFailed);
            return Ok(RunOutcome::OpenFailed);
        }
    };

    let summary = ReportLoop::new(&session, shutdown, console, config.report_length)
        .run()
        .await?;

    info!(
        reports = summary.reports,
        empty_reports = summary.empty_reports,
        read_errors = summary.read_errors,
        "report loop stopped"
    );
    Ok(RunOutcome::Stopped(summary))
}
