//! Display-date formatting.

use chrono::DateTime;

/// Format an ISO-8601 timestamp as a human-facing date line,
/// e.g. `"5 January 2026"`.
///
/// Falls back to the input string unchanged when it does not parse;
/// a malformed timestamp must never fail an export.
pub fn format_display_date(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.format("%-d %B %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_rfc3339() {
        assert_eq!(format_display_date("2026-01-05T12:00:00Z"), "5 January 2026");
        assert_eq!(
            format_display_date("2025-11-30T23:59:59+01:00"),
            "30 November 2025"
        );
    }

    #[test]
    fn test_falls_back_to_input() {
        assert_eq!(format_display_date("not a date"), "not a date");
    }
}
