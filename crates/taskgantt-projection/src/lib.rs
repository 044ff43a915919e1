//! # taskgantt-projection
//!
//! Builds the Gantt projection: a flat, sorted list of task bars and
//! synthetic group ("project") bars from a snapshot of task records.
//!
//! This crate provides:
//! - Date normalization and chart eligibility (`normalize`)
//! - Completion percentages (`progress`)
//! - Grouping into project headers (`grouping`)
//! - Sort strategies (`sort`)
//! - Bar moves back to records (`reschedule`)
//! - `GanttView`, the stateful wrapper a front end drives
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use taskgantt_core::{CollapseSet, SortStrategy, TaskRecord};
//! use taskgantt_projection::build_projection;
//!
//! let tasks = vec![
//!     TaskRecord::new(1, "Draft").group("Work").start("2024-01-01").due("2024-01-03"),
//!     TaskRecord::new(2, "Review").group("Work").start("2024-01-02").due("2024-01-05"),
//! ];
//! let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! let projection = build_projection(&tasks, SortStrategy::Default, &CollapseSet::new(), now);
//! assert_eq!(projection.len(), 3);
//! assert_eq!(projection.entries[0].id, "project-0-Work");
//! ```

pub mod grouping;
pub mod normalize;
pub mod progress;
pub mod reschedule;
pub mod sort;
mod view;

pub use normalize::{is_eligible, normalize_dates};
pub use progress::task_progress;
pub use reschedule::reschedule;
pub use view::GanttView;

use chrono::NaiveDateTime;
use taskgantt_core::{CollapseSet, Projection, SortStrategy, TaskRecord};
use tracing::{debug, trace};

/// Build the ordered projection for a task snapshot.
///
/// Pure function of its inputs: tasks lacking a parseable start or due date
/// are left out, the rest are grouped, aggregated and sorted.
pub fn build_projection(
    tasks: &[TaskRecord],
    sort: SortStrategy,
    collapsed: &CollapseSet,
    now: NaiveDateTime,
) -> Projection {
    let eligible = tasks.iter().filter(|task| {
        let ok = is_eligible(task);
        if !ok {
            trace!(task_id = task.id, "task left out of chart: missing or invalid dates");
        }
        ok
    });

    let partition = grouping::partition(eligible);
    let mut entries = grouping::group_entries(&partition, collapsed, now);
    sort::sort_entries(&mut entries, sort);

    debug!(
        tasks = tasks.len(),
        entries = entries.len(),
        projects = partition.grouped.len(),
        %sort,
        "built projection"
    );

    Projection { entries, sort }
}
