//! Bar moves back to task records
//!
//! When a bar is dragged or resized the chart reports the entry id and the
//! new interval. The matching task is copied with its dates rewritten in the
//! backend's `YYYY-MM-DD HH:MM` form; persistence is the caller's job.

use chrono::NaiveDateTime;
use taskgantt_core::dates::format_instant;
use taskgantt_core::TaskRecord;

/// Updated copy of the task behind `entry_id`, or `None` for project headers
/// and unknown ids
pub fn reschedule(
    tasks: &[TaskRecord],
    entry_id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Option<TaskRecord> {
    let original = tasks.iter().find(|t| t.entry_id() == entry_id)?;
    Some(TaskRecord {
        start_date: Some(format_instant(start)),
        due_date: Some(format_instant(end)),
        ..original.clone()
    })
}
