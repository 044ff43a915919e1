//! Grouping and aggregation of chart rows
//!
//! Eligible tasks are bucketed by trimmed group label. Every bucket yields a
//! synthetic `project` header spanning its members, followed by the member
//! rows with `parent_id` pointing at the header. Ungrouped tasks follow all
//! groups, in input order.
//!
//! Buckets live in a `BTreeMap`, so project ids (`project-<index>-<label>`)
//! depend only on the set of labels present, not on input order.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use taskgantt_core::{CollapseSet, EntryKind, Ordinal, ProjectionEntry, TaskRecord};

use crate::normalize::task_interval;
use crate::progress::{mean_progress, task_progress};

/// Tasks split by group label
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub grouped: BTreeMap<&'a str, Vec<&'a TaskRecord>>,
    pub ungrouped: Vec<&'a TaskRecord>,
}

/// Split tasks by trimmed group label, keeping input order within a bucket
pub fn partition<'a, I>(tasks: I) -> Partition<'a>
where
    I: IntoIterator<Item = &'a TaskRecord>,
{
    let mut partition = Partition::default();
    for task in tasks {
        match task.group_label() {
            Some(label) => partition.grouped.entry(label).or_default().push(task),
            None => partition.ungrouped.push(task),
        }
    }
    partition
}

/// Synthesized id of the `index`-th group
pub fn project_id(index: usize, label: &str) -> String {
    format!("project-{}-{}", index, label)
}

/// Row for a single task
pub fn task_entry(task: &TaskRecord, parent_id: Option<&str>, now: NaiveDateTime) -> ProjectionEntry {
    let (start, end) = task_interval(task, now);
    ProjectionEntry {
        id: task.entry_id(),
        kind: EntryKind::Task,
        name: task.description.clone(),
        start,
        end,
        progress: task_progress(task),
        parent_id: parent_id.map(str::to_string),
        dependency_ids: task
            .dependencies
            .as_ref()
            .map(|deps| deps.iter().map(|d| d.to_string()).collect()),
        collapsed: false,
        ordinal: Ordinal::Task(task.id),
    }
}

/// Header row spanning `members`. Returns `None` for an empty slice.
pub fn project_entry(
    index: usize,
    label: &str,
    members: &[ProjectionEntry],
    collapsed: &CollapseSet,
) -> Option<ProjectionEntry> {
    let start = members.iter().map(|m| m.start).min()?;
    let end = members.iter().map(|m| m.end).max()?;
    let progress: Vec<u8> = members.iter().map(|m| m.progress).collect();
    let id = project_id(index, label);

    Some(ProjectionEntry {
        collapsed: collapsed.contains(&id),
        id,
        kind: EntryKind::Project,
        name: label.to_string(),
        start,
        end,
        progress: mean_progress(&progress),
        parent_id: None,
        dependency_ids: None,
        ordinal: Ordinal::Project(index),
    })
}

/// Build all rows, in build order: each project then its members, then
/// ungrouped tasks
pub fn group_entries(
    partition: &Partition<'_>,
    collapsed: &CollapseSet,
    now: NaiveDateTime,
) -> Vec<ProjectionEntry> {
    let mut entries = Vec::new();

    for (index, (label, tasks)) in partition.grouped.iter().enumerate() {
        let id = project_id(index, label);
        let members: Vec<ProjectionEntry> = tasks
            .iter()
            .map(|task| task_entry(task, Some(&id), now))
            .collect();

        if let Some(header) = project_entry(index, label, &members, collapsed) {
            entries.push(header);
            entries.extend(members);
        }
    }

    entries.extend(partition.ungrouped.iter().map(|task| task_entry(task, None, now)));
    entries
}
