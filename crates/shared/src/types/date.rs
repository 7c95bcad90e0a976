//! Lenient timestamp parsing for query strings and request bodies.

use chrono::{DateTime, NaiveDate, Utc};

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
///
/// Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parses_plain_date_as_midnight_utc() {
        let ts = parse_timestamp("2024-03-15").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parses_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-03-15T12:00:00+03:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-40").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
