//! Hex rendering of report payloads

/// Separator placed between rendered bytes.
pub const BYTE_SEPARATOR: &str = ", ";

/// Render bytes as uppercase two-digit hex, joined by [`BYTE_SEPARATOR`].
///
/// An empty slice renders as an empty string.
pub fn format_report(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(BYTE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_full_report() {
        assert_eq!(
            format_report(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
            "01, 02, 03, 04, 05, 06, 07, 08"
        );
    }

    #[test]
    fn test_format_uppercase_and_padding() {
        assert_eq!(format_report(&[0x0a, 0xff, 0x00]), "0A, FF, 00");
    }

    #[test]
    fn test_format_single_byte_has_no_separator() {
        assert_eq!(format_report(&[0x7F]), "7F");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_report(&[]), "");
    }
}
