//! Lenient parsing and formatting of task date strings
//!
//! Task records carry local wall-clock dates as free text, usually
//! `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`. Parsing never fails loudly: anything
//! unrecognised is simply `None` and the caller decides the fallback.

use chrono::{NaiveDate, NaiveDateTime};

/// Format written back to task records after a bar is moved
pub const TASK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a task date string into a local instant.
///
/// Date-only values resolve to midnight. Blank input is treated as missing.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse an optional date field, treating `None` and blank alike
pub fn parse_optional(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(parse_instant)
}

/// Format an instant the way the task backend stores it (`YYYY-MM-DD HH:MM`)
pub fn format_instant(instant: NaiveDateTime) -> String {
    instant.format(TASK_DATE_FORMAT).to_string()
}
