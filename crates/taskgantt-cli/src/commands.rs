//! Subcommand implementations

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use taskgantt_core::dates::format_instant;
use taskgantt_core::store::{load_tasks, save_tasks, upsert};
use taskgantt_core::{EntryKind, Projection, RenderError, Renderer, SortStrategy, ViewMode};
use taskgantt_projection::GanttView;
use taskgantt_render::{MermaidRenderer, SvgRenderer};
use tracing::info;

use crate::config::{load_collapse_set, save_collapse_set, Config};
use crate::{RenderFormat, ShowFormat};

fn load_view(config: &Config, tasks_path: &Path) -> Result<GanttView> {
    let tasks = load_tasks(tasks_path)?;
    let collapsed = load_collapse_set(&config.state_path())?;
    info!(path = %tasks_path.display(), tasks = tasks.len(), "loaded tasks");
    Ok(GanttView::new(tasks).collapsed(collapsed))
}

pub fn show(
    config: &Config,
    tasks_path: PathBuf,
    sort: SortStrategy,
    now: NaiveDateTime,
    format: ShowFormat,
) -> Result<()> {
    let view = load_view(config, &tasks_path)?.sort(sort);
    let projection = view.projection(now);

    let mut stdout = std::io::stdout().lock();
    match format {
        ShowFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &projection)?;
            writeln!(stdout)?;
        }
        ShowFormat::Table => write_table(&mut stdout, &projection)?,
    }
    Ok(())
}

fn write_table(out: &mut impl Write, projection: &Projection) -> std::io::Result<()> {
    if projection.is_empty() {
        return writeln!(out, "{}", RenderError::Empty);
    }

    writeln!(
        out,
        "{:<24} {:<8} {:<28} {:<16} {:<16} {:>4}",
        "ID", "KIND", "NAME", "START", "END", "%"
    )?;
    for entry in projection.visible() {
        let kind = match entry.kind {
            EntryKind::Project if entry.collapsed => "project+",
            EntryKind::Project => "project",
            EntryKind::Task => "task",
        };
        let name = if entry.parent_id.is_some() {
            format!("  {}", entry.name)
        } else {
            entry.name.clone()
        };
        writeln!(
            out,
            "{:<24} {:<8} {:<28} {:<16} {:<16} {:>4}",
            entry.id,
            kind,
            name,
            format_instant(entry.start),
            format_instant(entry.end),
            entry.progress
        )?;
    }
    Ok(())
}

pub struct RenderArgs {
    pub tasks: PathBuf,
    pub sort: SortStrategy,
    pub view: ViewMode,
    pub now: NaiveDateTime,
    pub format: RenderFormat,
    pub output: Option<PathBuf>,
}

pub fn render(config: &Config, args: RenderArgs) -> Result<()> {
    let view = load_view(config, &args.tasks)?
        .sort(args.sort)
        .view_mode(args.view);
    let projection = view.projection(args.now);

    let rendered = match args.format {
        RenderFormat::Svg => config
            .svg
            .apply(SvgRenderer::new())
            .view_mode(view.current_view_mode())
            .now(args.now)
            .render(&projection),
        RenderFormat::Mermaid => MermaidRenderer::new()
            .view_mode(view.current_view_mode())
            .render(&projection),
    }
    .context("rendering failed")?;

    match args.output {
        Some(path) => {
            fs::write(&path, rendered).with_context(|| format!("cannot write {}", path.display()))?;
            info!(path = %path.display(), "chart written");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

pub fn reschedule(tasks_path: PathBuf, id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if start >= end {
        bail!("start {} must be before end {}", format_instant(start), format_instant(end));
    }

    let view = GanttView::new(load_tasks(&tasks_path)?);
    let mut updated = None;
    if !view.on_date_change(id, start, end, |task| updated = Some(task)) {
        bail!("no task with id '{}' in {}", id, tasks_path.display());
    }

    let mut tasks = view.tasks().to_vec();
    if let Some(task) = updated {
        println!(
            "{}: {} -> {}",
            task.id,
            task.start_date.as_deref().unwrap_or_default(),
            task.due_date.as_deref().unwrap_or_default()
        );
        upsert(&mut tasks, task);
    }
    save_tasks(&tasks, &tasks_path)?;
    info!(path = %tasks_path.display(), id, "task rescheduled");
    Ok(())
}

pub fn toggle(config: &Config, project_id: &str) -> Result<()> {
    let path = config.state_path();
    let mut collapsed = load_collapse_set(&path)?;
    let now_collapsed = collapsed.toggle(project_id);
    save_collapse_set(&collapsed, &path)?;

    println!(
        "{} {}",
        project_id,
        if now_collapsed { "collapsed" } else { "expanded" }
    );
    Ok(())
}
