//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a date string in the loose formats found in front-matter
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// Milliseconds since the epoch, with missing or invalid dates sorting as 0
pub fn timestamp_or_epoch(s: Option<&str>) -> i64 {
    s.and_then(parse_date)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Format a date string as `YYYY-MM-DD`, passing unparseable input through
pub fn short_date(s: &str) -> String {
    match parse_date(s) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => s.trim().to_string(),
    }
}
