//! # taskgantt-render
//!
//! Rendering backends for taskgantt projections.
//!
//! This crate provides:
//! - SVG Gantt chart rendering
//! - MermaidJS Gantt chart rendering (for Markdown notes)
//!
//! Both honour project collapse state and the Day/Week/Month view mode.
//!
//! ## Example
//!
//! ```rust,ignore
//! use taskgantt_core::{Renderer, ViewMode};
//! use taskgantt_render::{MermaidRenderer, SvgRenderer};
//!
//! let svg = SvgRenderer::default().view_mode(ViewMode::Week).render(&projection)?;
//! let mermaid = MermaidRenderer::new().render(&projection)?;
//! ```

pub mod mermaid;

pub use mermaid::MermaidRenderer;

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;
use taskgantt_core::{Projection, ProjectionEntry, RenderError, Renderer, ViewMode};

/// Closest allowed distance between two axis ticks, in pixels
const MIN_TICK_SPACING: u32 = 12;

/// SVG Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Width of the chart area (excluding labels) in pixels
    pub chart_width: u32,
    /// Height per row in pixels
    pub row_height: u32,
    /// Width of the label column in pixels
    pub label_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Time-axis granularity
    pub view_mode: ViewMode,
    /// Draw a marker at this instant when it falls inside the chart
    pub now: Option<NaiveDateTime>,
    /// Color for task bars
    pub task_color: String,
    /// Color for the completed part of a bar
    pub progress_color: String,
    /// Color for project summary bars
    pub project_color: String,
    /// Color of the "now" marker
    pub now_color: String,
    /// Background color
    pub background_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Text color
    pub text_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            chart_width: 800,
            row_height: 28,
            label_width: 180,
            header_height: 50,
            padding: 20,
            view_mode: ViewMode::Day,
            now: None,
            task_color: "#b8c2cc".into(),
            progress_color: "#ffbb54".into(),
            project_color: "#7db59a".into(),
            now_color: "#e74c3c".into(),
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    /// Configure the time-axis granularity
    pub fn view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Mark the current instant
    pub fn now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Calculate the total width of the SVG
    fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    /// Calculate the total height based on number of rows
    fn total_height(&self, row_count: usize) -> u32 {
        self.padding * 2 + self.header_height + (row_count as u32 * self.row_height)
    }

    /// Chart bounds: whole days around the projection span
    fn chart_range(start: NaiveDateTime, end: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let first = start.date().and_hms_opt(0, 0, 0).unwrap_or(start);
        let mut last = end.date().and_hms_opt(0, 0, 0).unwrap_or(end);
        if last < end {
            last = next_day(last);
        }
        (first, last.max(next_day(first)))
    }

    /// Calculate pixels per minute for the chart range
    fn pixels_per_minute(&self, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
        let minutes = (end - start).num_minutes().max(1) as f64;
        self.chart_width as f64 / minutes
    }

    /// Convert an instant to x position
    fn instant_to_x(&self, instant: NaiveDateTime, chart_start: NaiveDateTime, px_per_minute: f64) -> f64 {
        let minutes = (instant - chart_start).num_minutes() as f64;
        self.padding as f64 + self.label_width as f64 + (minutes * px_per_minute)
    }

    /// Tick dates along the axis for the current view mode.
    ///
    /// Ticks are thinned to every n-th day, week or month so that they stay
    /// at least `MIN_TICK_SPACING` pixels apart.
    fn ticks(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let first = match self.view_mode {
            ViewMode::Day => Some(start),
            ViewMode::Week => {
                let offset = (7 - start.weekday().num_days_from_monday()) % 7;
                start.checked_add_days(Days::new(u64::from(offset)))
            }
            ViewMode::Month if start.day() == 1 => Some(start),
            ViewMode::Month => start
                .with_day(1)
                .and_then(|d| d.checked_add_months(Months::new(1))),
        };

        let days = (end - start).num_days().max(0) as u64;
        let candidates = match self.view_mode {
            ViewMode::Day => days + 1,
            ViewMode::Week => days / 7 + 1,
            ViewMode::Month => days / 28 + 1,
        };
        let max_ticks = u64::from((self.chart_width / MIN_TICK_SPACING).max(1));
        let stride = candidates.div_ceil(max_ticks).max(1);

        let mut ticks = Vec::new();
        let mut next = first;
        while let Some(date) = next.filter(|d| *d <= end) {
            ticks.push(date);
            next = match self.view_mode {
                ViewMode::Day => date.checked_add_days(Days::new(stride)),
                ViewMode::Week => date.checked_add_days(Days::new(7 * stride)),
                ViewMode::Month => u32::try_from(stride)
                    .ok()
                    .and_then(|n| date.checked_add_months(Months::new(n))),
            };
        }
        ticks
    }

    fn tick_label(&self, date: NaiveDate) -> String {
        match self.view_mode {
            ViewMode::Day => date.format("%d").to_string(),
            ViewMode::Week => format!("W{:02}", date.iso_week().week()),
            ViewMode::Month => date.format("%b %Y").to_string(),
        }
    }

    /// Create the header with date labels
    fn render_header(&self, chart_start: NaiveDateTime, chart_end: NaiveDateTime, px_per_minute: f64) -> Group {
        let mut group = Group::new().set("class", "header");

        // Background for header
        let header_bg = Rectangle::new()
            .set("x", self.padding)
            .set("y", self.padding)
            .set("width", self.label_width + self.chart_width)
            .set("height", self.header_height)
            .set("fill", "#f8f9fa");
        group = group.add(header_bg);

        for date in self.ticks(chart_start.date(), chart_end.date()) {
            let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
                continue;
            };
            let x = self.instant_to_x(midnight, chart_start, px_per_minute);

            let tick = Line::new()
                .set("x1", x)
                .set("y1", self.padding + self.header_height - 10)
                .set("x2", x)
                .set("y2", self.padding + self.header_height)
                .set("stroke", self.text_color.as_str())
                .set("stroke-width", 1);
            group = group.add(tick);

            let text = Text::new(self.tick_label(date))
                .set("x", x)
                .set("y", self.padding + self.header_height - 15)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 1)
                .set("fill", self.text_color.as_str())
                .set("text-anchor", "middle");
            group = group.add(text);
        }

        // Month/Year label at the top
        let month_label = chart_start.format("%B %Y").to_string();
        let month_text = Text::new(month_label)
            .set("x", self.padding + self.label_width + self.chart_width / 2)
            .set("y", self.padding + 18)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size + 2)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str())
            .set("text-anchor", "middle");
        group = group.add(month_text);

        group
    }

    /// Render grid lines
    fn render_grid(
        &self,
        row_count: usize,
        chart_start: NaiveDateTime,
        chart_end: NaiveDateTime,
        px_per_minute: f64,
    ) -> Group {
        let mut group = Group::new().set("class", "grid");

        let chart_top = self.padding + self.header_height;
        let chart_bottom = chart_top + (row_count as u32 * self.row_height);

        // Horizontal lines for each row
        for i in 0..=row_count {
            let y = chart_top + (i as u32 * self.row_height);
            let line = Line::new()
                .set("x1", self.padding)
                .set("y1", y)
                .set("x2", self.padding + self.label_width + self.chart_width)
                .set("y2", y)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(line);
        }

        for date in self.ticks(chart_start.date(), chart_end.date()) {
            let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
                continue;
            };
            let x = self.instant_to_x(midnight, chart_start, px_per_minute);
            let line = Line::new()
                .set("x1", x)
                .set("y1", chart_top)
                .set("x2", x)
                .set("y2", chart_bottom)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(line);
        }

        group
    }

    /// Render a single row: label, bar and progress fill
    fn render_row(&self, entry: &ProjectionEntry, row: usize, chart_start: NaiveDateTime, px_per_minute: f64) -> Group {
        let class = if entry.is_project() { "project" } else { "task" };
        let mut group = Group::new().set("class", class).set("data-id", entry.id.as_str());

        let y = self.padding + self.header_height + (row as u32 * self.row_height);
        let bar_height = if entry.is_project() {
            (self.row_height as f64 * 0.4) as u32
        } else {
            (self.row_height as f64 * 0.6) as u32
        };
        let bar_y = y + (self.row_height - bar_height) / 2;

        // Label, indented for grouped tasks, with a disclosure marker on headers
        let (indent, label) = if entry.is_project() {
            let marker = if entry.collapsed { "▸" } else { "▾" };
            (8, format!("{} {}", marker, truncate(&entry.name, 20)))
        } else if entry.parent_id.is_some() {
            (20, truncate(&entry.name, 20))
        } else {
            (8, truncate(&entry.name, 22))
        };
        let label = Text::new(label)
            .set("x", self.padding + indent)
            .set("y", y + self.row_height / 2 + 4)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("font-weight", if entry.is_project() { "bold" } else { "normal" })
            .set("fill", self.text_color.as_str());
        group = group.add(label);

        let x_start = self.instant_to_x(entry.start, chart_start, px_per_minute);
        let x_end = self.instant_to_x(entry.end, chart_start, px_per_minute);
        let bar_width = (x_end - x_start).max(4.0); // Minimum width for visibility

        let color = if entry.is_project() {
            self.project_color.as_str()
        } else {
            self.task_color.as_str()
        };
        let bar = Rectangle::new()
            .set("x", x_start)
            .set("y", bar_y)
            .set("width", bar_width)
            .set("height", bar_height)
            .set("rx", 3)
            .set("ry", 3)
            .set("fill", color);
        group = group.add(bar);

        if entry.progress > 0 {
            let done = Rectangle::new()
                .set("x", x_start)
                .set("y", bar_y)
                .set("width", bar_width * f64::from(entry.progress) / 100.0)
                .set("height", bar_height)
                .set("rx", 3)
                .set("ry", 3)
                .set("fill", self.progress_color.as_str());
            group = group.add(done);
        }

        group
    }

    fn render_now_line(&self, x: f64, row_count: usize) -> Line {
        let top = self.padding + self.header_height;
        Line::new()
            .set("class", "now")
            .set("x1", x)
            .set("y1", top)
            .set("x2", x)
            .set("y2", top + row_count as u32 * self.row_height)
            .set("stroke", self.now_color.as_str())
            .set("stroke-width", 2)
            .set("stroke-dasharray", "4,3")
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, projection: &Projection) -> Result<String, RenderError> {
        let rows: Vec<&ProjectionEntry> = projection.visible().collect();
        let (span_start, span_end) = projection.span().ok_or(RenderError::Empty)?;

        let row_count = rows.len();
        let (chart_start, chart_end) = Self::chart_range(span_start, span_end);
        let px_per_minute = self.pixels_per_minute(chart_start, chart_end);

        let width = self.total_width();
        let height = self.total_height(row_count);

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background_color.as_str());
        document = document.add(background);

        document = document.add(self.render_grid(row_count, chart_start, chart_end, px_per_minute));
        document = document.add(self.render_header(chart_start, chart_end, px_per_minute));

        for (row, entry) in rows.iter().enumerate() {
            document = document.add(self.render_row(entry, row, chart_start, px_per_minute));
        }

        if let Some(now) = self.now.filter(|now| *now >= chart_start && *now <= chart_end) {
            let x = self.instant_to_x(now, chart_start, px_per_minute);
            document = document.add(self.render_now_line(x, row_count));
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

/// Following midnight, saturating at the end of the calendar
fn next_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .checked_add_signed(Duration::days(1))
        .unwrap_or(NaiveDateTime::MAX)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
