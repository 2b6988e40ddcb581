//! Error types for the report reader.
//!
//! Only [`ReaderError`] ever crosses the run boundary. Transport failures are
//! handled inside the report loop, and "no device" or "open failed" are
//! reported as [`crate::RunOutcome`] values rather than errors.

use std::path::PathBuf;

/// Failure reported by the transport for a single read.
///
/// Every variant is transient: the report loop logs it and begins the next
/// read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Error string surfaced by the HID backend
    #[error("{0}")]
    Hid(String),

    /// Device went away while the read was queued
    #[error("device disconnected")]
    Disconnected,

    /// The transport dropped the completion callback without invoking it
    #[error("read abandoned before completion")]
    Abandoned,
}

impl TransportError {
    /// Create a backend error from any displayable message.
    pub fn hid(message: impl Into<String>) -> Self {
        TransportError::Hid(message.into())
    }
}

/// Failure to acquire a session for a discovered device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpenError {
    /// The backend refused to open the device
    #[error("failed to open device {vendor_id:04X}:{product_id:04X}: {reason}")]
    Backend {
        /// USB vendor ID
        vendor_id: u16,
        /// USB product ID
        product_id: u16,
        /// Backend message
        reason: String,
    },

    /// The device opened but the session is not usable
    #[error("device opened but session is not usable")]
    Unusable,
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {}", .path.display())]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::ReaderConfig`]
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A field holds a value outside its accepted range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Unanticipated failure that ends a run.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// The open session stopped accepting reads
    #[error("device session is no longer usable")]
    SessionUnusable,

    /// HID backend failure outside of a single read
    #[error("HID backend error: {0}")]
    Backend(String),

    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display_is_backend_message() {
        let err = TransportError::hid("Resource temporarily unavailable");
        assert_eq!(err.to_string(), "Resource temporarily unavailable");
        assert_eq!(
            TransportError::Abandoned.to_string(),
            "read abandoned before completion"
        );
    }

    #[test]
    fn test_open_error_display_contains_ids() {
        let err = OpenError::Backend {
            vendor_id: 0x049A,
            product_id: 0x0005,
            reason: "permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("049A:0005"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_reader_error_wraps_config_error_transparently() {
        let err: ReaderError = ConfigError::Invalid("report_length too large".into()).into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: report_length too large"
        );
    }

    #[test]
    fn test_errors_are_std_errors() {
        let _: &dyn std::error::Error = &TransportError::Disconnected;
        let _: &dyn std::error::Error = &OpenError::Unusable;
        let _: &dyn std::error::Error = &ReaderError::SessionUnusable;
    }
}
