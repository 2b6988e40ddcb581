//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use neuroscope_core::{ConfigError, ReaderConfig};

/// Print input reports from a USB HID device as hex until Ctrl-C.
#[derive(Parser, Debug)]
#[command(name = "neuroscope", version)]
#[command(about = "Read input reports from a USB HID device and print them as hex")]
pub struct Cli {
    /// Vendor ID (hex, e.g. 0x049A) [default: 0x049A]
    #[arg(long, global = true, env = "NEUROSCOPE_VID", value_parser = parse_hex_u16)]
    pub vid: Option<u16>,

    /// Product ID (hex, e.g. 0x0005) [default: 0x0005]
    #[arg(long, global = true, env = "NEUROSCOPE_PID", value_parser = parse_hex_u16)]
    pub pid: Option<u16>,

    /// Number of bytes printed from each report [default: 8]
    #[arg(long, global = true, env = "NEUROSCOPE_REPORT_LENGTH")]
    pub report_length: Option<usize>,

    /// JSON file with vendor_id, product_id and report_length
    #[arg(long, global = true, env = "NEUROSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List all connected HID devices
    List,
}

impl Cli {
    /// Resolve the reader config: defaults, then the config file, then
    /// environment and command-line values.
    pub fn reader_config(&self) -> Result<ReaderConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ReaderConfig::from_json_file(path)?,
            None => ReaderConfig::default(),
        };
        if let Some(vid) = self.vid {
            config.vendor_id = vid;
        }
        if let Some(pid) = self.pid {
            config.product_id = pid;
        }
        if let Some(report_length) = self.report_length {
            config.report_length = report_length;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}
