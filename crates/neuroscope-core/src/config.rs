//! Reader configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_VENDOR_ID: u16 = 0x049A;
pub const DEFAULT_PRODUCT_ID: u16 = 0x0005;
pub const DEFAULT_REPORT_LENGTH: usize = 8;

/// Upper bound for `report_length`; larger than any HID input report.
pub const MAX_REPORT_LENGTH: usize = 4096;

/// Which device to read and how many bytes of each report to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Vendor ID filter for device enumeration
    pub vendor_id: u16,
    /// Product ID filter for device enumeration
    pub product_id: u16,
    /// Bytes taken from the front of each report
    pub report_length: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
            report_length: DEFAULT_REPORT_LENGTH,
        }
    }
}

impl ReaderConfig {
    pub fn new(vendor_id: u16, product_id: u16, report_length: usize) -> Self {
        Self {
            vendor_id,
            product_id,
            report_length,
        }
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ReaderConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(?path, ?config, "loaded reader config");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_length > MAX_REPORT_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "report_length {} exceeds maximum of {MAX_REPORT_LENGTH}",
                self.report_length
            )));
        }
        Ok(())
    }
}
