//! neuroscope - print input reports from a USB HID device as hex
//!
//! Reads reports from the first device matching the vendor/product filter
//! until Ctrl-C. Every failure is reported on stdout and the process exits
//! normally.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod args;
mod interrupt;
mod list;

use anyhow::{Context, Result};
use clap::Parser;
use neuroscope_core::{Console, ConsoleEvent, RunOutcome, ShutdownController, StdoutConsole};
use neuroscope_hid::HidApiLocator;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let level = cli.log_level();
                format!("neuroscope={level},neuroscope_core={level},neuroscope_hid={level}")
                    .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let console = StdoutConsole;
    if let Err(e) = execute(&cli, console).await {
        let message = format!("{e:#}");
        console.emit(ConsoleEvent::Unexpected(&message));
    }
}

async fn execute(cli: &Cli, console: StdoutConsole) -> Result<()> {
    if cli.command == Some(Command::List) {
        let locator = HidApiLocator::new().context("failed to initialise HID library")?;
        list::list_devices(&locator, &console);
        return Ok(());
    }

    let config = cli.reader_config()?;
    debug!(?config, "resolved reader config");
    let locator = HidApiLocator::new().context("failed to initialise HID library")?;

    let shutdown = ShutdownController::new();
    let listener = interrupt::spawn_listener(shutdown.clone(), console);
    let outcome = neuroscope_core::run(&locator, &config, shutdown, &console).await;
    listener.abort();

    match outcome? {
        RunOutcome::DeviceNotFound => info!("no matching device"),
        RunOutcome::OpenFailed => info!("device could not be opened"),
        RunOutcome::Stopped(summary) => info!(
            reports = summary.reports,
            reads = summary.reads_started,
            "stopped"
        ),
    }
    Ok(())
}
