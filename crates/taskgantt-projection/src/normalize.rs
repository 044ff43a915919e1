//! Date normalization for chart bars
//!
//! A bar needs a concrete, positive-width `[start, end)` interval. Task
//! records may only carry a due date, or nothing parseable at all, so the
//! interval is derived with an ordered fallback:
//!
//! 1. `end` = parsed due date, else `now`
//! 2. `start` = parsed start date, if any
//! 3. otherwise `start` = `now` when `end` is in the future, else `end - 24h`
//! 4. if `start >= end`, `start` = `end - 1h`

use chrono::{Duration, NaiveDateTime};
use taskgantt_core::dates::parse_optional;
use taskgantt_core::TaskRecord;

/// Resolve the bar interval from raw date strings. Always `start < end`.
pub fn normalize_dates(
    start_date: Option<&str>,
    due_date: Option<&str>,
    now: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let end = parse_optional(due_date).unwrap_or(now);

    let start = match parse_optional(start_date) {
        Some(start) => start,
        None if end > now => now,
        None => end
            .checked_sub_signed(Duration::hours(24))
            .unwrap_or(NaiveDateTime::MIN),
    };

    if start < end {
        return (start, end);
    }
    match end.checked_sub_signed(Duration::hours(1)) {
        Some(start) => (start, end),
        // nothing representable before `end`: keep the hour, move the end
        None => (end, end + Duration::hours(1)),
    }
}

/// Normalize the dates of a task record
pub fn task_interval(task: &TaskRecord, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    normalize_dates(task.start_date.as_deref(), task.due_date.as_deref(), now)
}

/// Chart admission: both dates present and independently parseable
pub fn is_eligible(task: &TaskRecord) -> bool {
    parse_optional(task.start_date.as_deref()).is_some()
        && parse_optional(task.due_date.as_deref()).is_some()
}
