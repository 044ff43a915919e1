//! # taskgantt-core
//!
//! Core domain model and traits for the taskgantt schedule view.
//!
//! This crate provides:
//! - Domain types: `TaskRecord`, `Subtask`, `Projection`, `ProjectionEntry`
//! - View state types: `SortStrategy`, `ViewMode`, `CollapseSet`
//! - Lenient date handling (`dates`) and the JSON task file (`store`)
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use taskgantt_core::TaskRecord;
//!
//! let task = TaskRecord::new(1, "Write report")
//!     .start("2024-01-01")
//!     .due("2024-01-03 17:00")
//!     .group("Work")
//!     .depends_on(7);
//!
//! assert_eq!(task.group_label(), Some("Work"));
//! assert_eq!(task.dependencies, Some(vec![7]));
//! ```

pub mod dates;
pub mod store;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Backend identifier of a task
pub type TaskId = i64;

/// Identifier of a projection entry (task id as string, or a project id)
pub type EntryId = String;

// ============================================================================
// Task Record
// ============================================================================

/// A checklist item inside a task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(id: i64, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            completed: false,
        }
    }

    /// Mark as completed (builder pattern)
    pub fn done(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// Plain string fields of the backend record: `None` is written as `""`
/// and read back from `""` or `null`.
mod empty_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
    }
}

/// A task as stored by the backend.
///
/// Read-only input to the projection. Fields the chart does not use
/// (`details`, `notified`, `notification_minutes`) are carried so that a
/// rescheduled record can be written back without losing data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Unique identifier
    pub id: TaskId,
    /// Display label
    #[serde(default)]
    pub description: String,
    /// Planned start, `YYYY-MM-DD[ HH:MM]`
    #[serde(default)]
    pub start_date: Option<String>,
    /// Due date, `YYYY-MM-DD[ HH:MM]`
    #[serde(default, with = "empty_string")]
    pub due_date: Option<String>,
    /// Free-text group label; blank means ungrouped
    #[serde(default, with = "empty_string")]
    pub group: Option<String>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notified: bool,
    #[serde(default)]
    pub notification_minutes: Option<i32>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Predecessor task ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<TaskId>>,
}

impl TaskRecord {
    /// Create a new task with the given ID and description
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            start_date: None,
            due_date: None,
            group: None,
            details: String::new(),
            completed: false,
            notified: false,
            notification_minutes: None,
            subtasks: Vec::new(),
            dependencies: None,
        }
    }

    /// Set the start date string
    pub fn start(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the due date string
    pub fn due(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    /// Set the group label
    pub fn group(mut self, label: impl Into<String>) -> Self {
        self.group = Some(label.into());
        self
    }

    /// Mark as completed
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Add a subtask
    pub fn subtask(mut self, subtask: Subtask) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Add a predecessor
    pub fn depends_on(mut self, predecessor: TaskId) -> Self {
        self.dependencies
            .get_or_insert_with(Vec::new)
            .push(predecessor);
        self
    }

    /// Trimmed group label, `None` when missing or blank
    pub fn group_label(&self) -> Option<&str> {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    /// Entry id this task gets in a projection
    pub fn entry_id(&self) -> EntryId {
        self.id.to_string()
    }
}

// ============================================================================
// View State
// ============================================================================

/// Ordering applied to the flat projection list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortStrategy {
    /// Projects by index, then tasks by ascending id
    #[default]
    Default,
    /// Ascending start instant
    StartDate,
    /// Ascending end instant
    DueDate,
    /// Locale-aware ascending name
    Name,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 4] = [
        SortStrategy::Default,
        SortStrategy::StartDate,
        SortStrategy::DueDate,
        SortStrategy::Name,
    ];

    /// The tag used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::Default => "default",
            SortStrategy::StartDate => "startDate",
            SortStrategy::DueDate => "dueDate",
            SortStrategy::Name => "name",
        }
    }
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortStrategy {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError {
                kind: "sort strategy",
                value: s.to_string(),
            })
    }
}

/// Time-axis granularity of a rendered chart
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(ParseTagError {
                kind: "view mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Project ids whose member rows are hidden
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseSet {
    ids: BTreeSet<EntryId>,
}

impl CollapseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `project_id`. Returns `true` if it is now collapsed.
    pub fn toggle(&mut self, project_id: &str) -> bool {
        if self.ids.remove(project_id) {
            false
        } else {
            self.ids.insert(project_id.to_string());
            true
        }
    }

    pub fn contains(&self, project_id: &str) -> bool {
        self.ids.contains(project_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CollapseSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Projection (Result)
// ============================================================================

/// Kind of a projection row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Task,
    Project,
}

/// Key of the default ordering.
///
/// Variant order is significant: all project headers sort before tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ordinal {
    /// Synthesized group header, by enumeration index
    Project(usize),
    /// Task row, by backend id
    Task(TaskId),
}

/// One renderable row of the schedule view
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Completion percentage (0-100)
    pub progress: u8,
    /// Owning project, for grouped tasks only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntryId>,
    /// Predecessor entry ids, task entries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_ids: Option<Vec<EntryId>>,
    /// Project rows only: member rows hidden
    pub collapsed: bool,
    pub ordinal: Ordinal,
}

impl ProjectionEntry {
    pub fn is_project(&self) -> bool {
        self.kind == EntryKind::Project
    }

    pub fn is_task(&self) -> bool {
        self.kind == EntryKind::Task
    }

    /// Bar length
    pub fn span(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Ordered, render-ready rows built from a task snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub entries: Vec<ProjectionEntry>,
    pub sort: SortStrategy,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&ProjectionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Earliest start and latest end over all entries
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.entries.iter().map(|e| e.start).min()?;
        let end = self.entries.iter().map(|e| e.end).max()?;
        Some((start, end))
    }

    /// Entries in order, skipping members of collapsed projects
    pub fn visible(&self) -> impl Iterator<Item = &ProjectionEntry> {
        self.entries.iter().filter(move |entry| {
            entry
                .parent_id
                .as_deref()
                .and_then(|parent| self.get(parent))
                .map_or(true, |parent| !parent.collapsed)
        })
    }

    /// Member rows of a project, in list order
    pub fn tasks_of<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a ProjectionEntry> {
        self.entries
            .iter()
            .filter(move |e| e.parent_id.as_deref() == Some(project_id))
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectionEntry> {
        self.entries.iter().filter(|e| e.is_project())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a projection to the output format
    fn render(&self, projection: &Projection) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Unknown sort strategy or view mode tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No tasks to display")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

/// Task file error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access task file {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed task file {}: {source}", path.display())]
    Json {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// Tests
// ============================================================================
