//! MermaidJS Gantt chart renderer
//!
//! Generates text-based Gantt charts in MermaidJS format, suitable for
//! embedding in Markdown notes and wikis.
//!
//! ## Example Output
//!
//! ```text
//! gantt
//!     title Tasks
//!     dateFormat YYYY-MM-DD HH:mm
//!     axisFormat %m-%d
//!
//!     section Work
//!     Plan             :done, t1, 2024-01-01 00:00, 2024-01-03 00:00
//!     Build            :active, t2, after t1, 2024-01-05 00:00
//!
//!     section Ungrouped
//!     Walk the dog     :t3, 2024-01-02 00:00, 2024-01-02 01:00
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;
use taskgantt_core::{Projection, ProjectionEntry, RenderError, Renderer, ViewMode};

const MERMAID_INSTANT: &str = "%Y-%m-%d %H:%M";

/// MermaidJS Gantt chart renderer
#[derive(Clone, Debug)]
pub struct MermaidRenderer {
    /// Chart title
    pub title: String,
    /// Whether to emit `done`/`active` modifiers
    pub show_completion: bool,
    /// Whether to use `after` syntax for the first dependency
    pub use_dependencies: bool,
    /// Axis labelling granularity
    pub view_mode: ViewMode,
    /// Section title for tasks without a group
    pub ungrouped_label: String,
}

impl Default for MermaidRenderer {
    fn default() -> Self {
        Self {
            title: "Tasks".into(),
            show_completion: true,
            use_dependencies: true,
            view_mode: ViewMode::Day,
            ungrouped_label: "Ungrouped".into(),
        }
    }
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chart title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Disable completion status
    pub fn no_completion(mut self) -> Self {
        self.show_completion = false;
        self
    }

    /// Use absolute dates instead of `after` dependencies
    pub fn absolute_dates(mut self) -> Self {
        self.use_dependencies = false;
        self
    }

    /// Set the view mode
    pub fn view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Sanitize task name for Mermaid (escape special characters)
    fn sanitize_name(name: &str) -> String {
        // Mermaid is sensitive to colons and special chars in task names
        name.replace(':', "-")
            .replace(';', "-")
            .replace('#', "")
            .replace('\n', " ")
            .replace('\r', "")
    }

    /// Mermaid task id for an entry id
    fn make_id(entry_id: &str) -> String {
        let id: String = entry_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        format!("t{}", id)
    }

    fn axis_format(&self) -> &'static str {
        match self.view_mode {
            ViewMode::Day => "%m-%d",
            ViewMode::Week => "W%V",
            ViewMode::Month => "%Y-%m",
        }
    }

    fn modifiers(&self, entry: &ProjectionEntry) -> Option<&'static str> {
        if !self.show_completion {
            return None;
        }
        match entry.progress {
            100 => Some("done"),
            0 => None,
            _ => Some("active"),
        }
    }

    /// Format a single task line
    fn format_task_line(&self, entry: &ProjectionEntry, rendered: &HashMap<&str, NaiveDateTime>) -> String {
        let mut parts = Vec::new();

        if let Some(modifier) = self.modifiers(entry) {
            parts.push(modifier.to_string());
        }

        parts.push(Self::make_id(&entry.id));

        // `after` starts the bar at the predecessor's end, so it is only
        // exact for a predecessor already declared that ends at our start
        let predecessor = entry
            .dependency_ids
            .as_ref()
            .and_then(|deps| deps.first())
            .filter(|dep| self.use_dependencies && rendered.get(dep.as_str()) == Some(&entry.start));
        match predecessor {
            Some(dep) => parts.push(format!("after {}", Self::make_id(dep))),
            None => parts.push(entry.start.format(MERMAID_INSTANT).to_string()),
        }

        parts.push(entry.end.format(MERMAID_INSTANT).to_string());

        format!("{} :{}", Self::sanitize_name(&entry.name), parts.join(", "))
    }
}

impl Renderer for MermaidRenderer {
    type Output = String;

    fn render(&self, projection: &Projection) -> Result<String, RenderError> {
        if projection.is_empty() {
            return Err(RenderError::Empty);
        }

        let mut output = String::new();

        // Header
        output.push_str("gantt\n");
        output.push_str(&format!("    title {}\n", Self::sanitize_name(&self.title)));
        output.push_str("    dateFormat YYYY-MM-DD HH:mm\n");
        output.push_str(&format!("    axisFormat {}\n", self.axis_format()));
        output.push('\n');

        // declared task ids with their end instants
        let mut rendered: HashMap<&str, NaiveDateTime> = HashMap::new();

        // One section per project, members in list order; collapsed
        // projects keep their section but show a single summary bar
        for project in projection.projects() {
            output.push_str(&format!("    section {}\n", Self::sanitize_name(&project.name)));
            if project.collapsed {
                output.push_str(&format!("    {}\n", self.format_task_line(project, &rendered)));
                rendered.insert(&project.id, project.end);
            } else {
                for task in projection.tasks_of(&project.id) {
                    output.push_str(&format!("    {}\n", self.format_task_line(task, &rendered)));
                    rendered.insert(&task.id, task.end);
                }
            }
            output.push('\n');
        }

        let ungrouped: Vec<&ProjectionEntry> = projection
            .entries
            .iter()
            .filter(|e| e.is_task() && e.parent_id.is_none())
            .collect();
        if !ungrouped.is_empty() {
            output.push_str(&format!("    section {}\n", Self::sanitize_name(&self.ungrouped_label)));
            for task in ungrouped {
                output.push_str(&format!("    {}\n", self.format_task_line(task, &rendered)));
                rendered.insert(&task.id, task.end);
            }
            output.push('\n');
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use taskgantt_core::{EntryKind, Ordinal, SortStrategy};

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn task(id: i64, name: &str, parent: Option<&str>, start: u32, end: u32, progress: u8) -> ProjectionEntry {
        ProjectionEntry {
            id: id.to_string(),
            kind: EntryKind::Task,
            name: name.into(),
            start: at(start),
            end: at(end),
            progress,
            parent_id: parent.map(Into::into),
            dependency_ids: None,
            collapsed: false,
            ordinal: Ordinal::Task(id),
        }
    }

    fn project(name: &str, collapsed: bool) -> ProjectionEntry {
        ProjectionEntry {
            id: format!("project-0-{}", name),
            kind: EntryKind::Project,
            name: name.into(),
            start: at(1),
            end: at(5),
            progress: 50,
            parent_id: None,
            dependency_ids: None,
            collapsed,
            ordinal: Ordinal::Project(0),
        }
    }

    fn create_test_projection(collapsed: bool) -> Projection {
        let mut build = task(2, "Build", Some("project-0-Work"), 3, 5, 40);
        build.dependency_ids = Some(vec!["1".into()]);
        Projection {
            entries: vec![
                project("Work", collapsed),
                task(1, "Plan", Some("project-0-Work"), 1, 3, 100),
                build,
                task(3, "Walk: dog", None, 2, 3, 0),
            ],
            sort: SortStrategy::Default,
        }
    }

    #[test]
    fn mermaid_basic_structure() {
        let output = MermaidRenderer::new().render(&create_test_projection(false)).unwrap();

        assert!(output.starts_with("gantt\n"));
        assert!(output.contains("    title Tasks\n"));
        assert!(output.contains("dateFormat YYYY-MM-DD HH:mm"));
        assert!(output.contains("axisFormat %m-%d"));
        assert!(output.contains("section Work"));
        assert!(output.contains("section Ungrouped"));
    }

    #[test]
    fn mermaid_task_lines() {
        let output = MermaidRenderer::new().render(&create_test_projection(false)).unwrap();

        assert!(output.contains("Plan :done, t1, 2024-01-01 00:00, 2024-01-03 00:00"));
        assert!(output.contains("Build :active, t2, after t1, 2024-01-05 00:00"));
        // colon replaced in names
        assert!(output.contains("Walk- dog :t3, 2024-01-02 00:00, 2024-01-03 00:00"));
    }

    #[test]
    fn mermaid_absolute_dates() {
        let output = MermaidRenderer::new()
            .absolute_dates()
            .no_completion()
            .render(&create_test_projection(false))
            .unwrap();

        assert!(!output.contains("after"));
        assert!(!output.contains("done"));
        assert!(output.contains("Build :t2, 2024-01-03 00:00, 2024-01-05 00:00"));
    }

    #[test]
    fn mermaid_collapsed_project_shows_summary() {
        let output = MermaidRenderer::new().render(&create_test_projection(true)).unwrap();

        assert!(output.contains("Work :active, tproject_0_Work, 2024-01-01 00:00, 2024-01-05 00:00"));
        assert!(!output.contains("Plan"));
        assert!(!output.contains("Build"));
        assert!(output.contains("Walk- dog"));
    }

    #[test]
    fn mermaid_dependency_on_hidden_task_uses_dates() {
        let mut projection = create_test_projection(false);
        // declare the dependent task before its predecessor
        projection.entries.swap(1, 2);
        let output = MermaidRenderer::new().render(&projection).unwrap();
        assert!(output.contains("Build :active, t2, 2024-01-03 00:00, 2024-01-05 00:00"));
    }

    #[test]
    fn mermaid_overlapping_successor_keeps_its_start() {
        let mut projection = create_test_projection(false);
        // Build now starts a day before Plan ends
        projection.entries[2].start = at(2);
        let output = MermaidRenderer::new().render(&projection).unwrap();
        assert!(!output.contains("after"));
        assert!(output.contains("Build :active, t2, 2024-01-02 00:00, 2024-01-05 00:00"));
    }

    #[test]
    fn mermaid_view_mode_axis() {
        let renderer = MermaidRenderer::new().view_mode(ViewMode::Month).title("Q1 #plan");
        let output = renderer.render(&create_test_projection(false)).unwrap();
        assert!(output.contains("axisFormat %Y-%m"));
        assert!(output.contains("title Q1 plan"));
    }

    #[test]
    fn mermaid_empty_projection() {
        let result = MermaidRenderer::new().render(&Projection::default());
        assert!(matches!(result, Err(RenderError::Empty)));
    }
}
