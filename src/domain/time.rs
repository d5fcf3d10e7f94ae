//! Timestamp parsing and display for backend date strings.

use chrono::{DateTime, NaiveDate, Utc};

/// Parses RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
/// Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// "Jan 15, 2025". Missing dates read "Not started"; unparseable ones are shown verbatim.
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        None => "Not started".to_string(),
        Some(s) if s.is_empty() => "Not started".to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(dt) => dt.format("%b %-d, %Y").to_string(),
            None => s.to_string(),
        },
    }
}
