//! Stateful schedule view
//!
//! Wraps a task snapshot with the user's sort, view mode and collapsed
//! projects, and forwards bar moves to the caller as updated records.

use chrono::NaiveDateTime;
use taskgantt_core::{CollapseSet, Projection, SortStrategy, TaskRecord, ViewMode};
use tracing::debug;

use crate::{build_projection, reschedule};

/// Schedule view state: the task snapshot plus everything the user selects.
///
/// The projection is rebuilt from scratch on every call to
/// [`GanttView::projection`]; nothing is cached between builds.
#[derive(Clone, Debug, Default)]
pub struct GanttView {
    tasks: Vec<TaskRecord>,
    sort: SortStrategy,
    view_mode: ViewMode,
    collapsed: CollapseSet,
}

impl GanttView {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Set the initial sort strategy (builder pattern)
    pub fn sort(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    /// Set the initial view mode (builder pattern)
    pub fn view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Start with an existing collapse set (builder pattern)
    pub fn collapsed(mut self, collapsed: CollapseSet) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Replace the task snapshot
    pub fn set_tasks(&mut self, tasks: Vec<TaskRecord>) {
        self.tasks = tasks;
    }

    pub fn set_sort(&mut self, sort: SortStrategy) {
        self.sort = sort;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn current_sort(&self) -> SortStrategy {
        self.sort
    }

    pub fn current_view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn collapse_set(&self) -> &CollapseSet {
        &self.collapsed
    }

    /// Expander toggle on a project header. Returns the new collapsed state.
    pub fn toggle_expander(&mut self, project_id: &str) -> bool {
        let collapsed = self.collapsed.toggle(project_id);
        debug!(project_id, collapsed, "toggled project expander");
        collapsed
    }

    /// Current projection
    pub fn projection(&self, now: NaiveDateTime) -> Projection {
        build_projection(&self.tasks, self.sort, &self.collapsed, now)
    }

    /// A bar was moved or resized. Hands the rewritten task to `on_update`
    /// and reports whether the entry belonged to a task.
    pub fn on_date_change<F>(
        &self,
        entry_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        on_update: F,
    ) -> bool
    where
        F: FnOnce(TaskRecord),
    {
        match reschedule(&self.tasks, entry_id, start, end) {
            Some(task) => {
                debug!(entry_id, "bar moved, forwarding task update");
                on_update(task);
                true
            }
            None => false,
        }
    }
}
