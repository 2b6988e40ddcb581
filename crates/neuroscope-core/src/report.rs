//! Input report data model

use crate::error::TransportError;

/// Result of one device read as delivered by the transport.
pub type ReadOutcome = Result<Report, TransportError>;

/// One input report, exactly as received from the transport.
///
/// A report may be empty; the report loop treats that as an invalid report
/// rather than a transport error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    data: Vec<u8>,
}

impl Report {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The first `report_length` bytes, or the whole report when it is
    /// shorter. Never pads.
    pub fn truncated(&self, report_length: usize) -> &[u8] {
        let bytes = self.as_bytes();
        bytes.get(..report_length.min(bytes.len())).unwrap_or_default()
    }
}

impl From<Vec<u8>> for Report {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for Report {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_longer_report() {
        let report = Report::from(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(report.truncated(8), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(report.len(), 10);
    }

    #[test]
    fn test_truncated_shorter_report_is_not_padded() {
        let report = Report::from(&[0xAA, 0xBB][..]);
        assert_eq!(report.truncated(8), &[0xAA, 0xBB]);
    }

    #[test]
    fn test_truncated_zero_length() {
        let report = Report::from(vec![1, 2, 3]);
        assert!(report.truncated(0).is_empty());
    }

    #[test]
    fn test_empty_report() {
        let report = Report::default();
        assert!(report.is_empty());
        assert!(report.truncated(8).is_empty());
    }
}
