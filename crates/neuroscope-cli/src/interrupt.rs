//! Ctrl-C wiring.
//!
//! Listening for Ctrl-C through tokio replaces the default "terminate the
//! process" behaviour, so the report loop gets to stop on its own.

use neuroscope_core::{Console, ConsoleEvent, ShutdownController};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// React to one operator interrupt.
///
/// Only the first interrupt prints `Stopping...`, before the shutdown is
/// requested; later ones are logged.
pub fn handle_interrupt(shutdown: &ShutdownController, console: &dyn Console) {
    if shutdown.is_shutdown_requested() {
        warn!("interrupt received while already stopping");
        return;
    }
    info!("interrupt received, stopping");
    console.emit(ConsoleEvent::Stopping);
    shutdown.request_shutdown();
}

pub fn spawn_listener<C>(shutdown: ShutdownController, console: C) -> JoinHandle<()>
where
    C: Console + 'static,
{
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C");
                return;
            }
            handle_interrupt(&shutdown, &console);
        }
    })
}
