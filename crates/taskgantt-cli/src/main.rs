//! taskgantt CLI - schedule view for a personal task list
//!
//! Command-line interface for projecting, rendering and rescheduling tasks.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use taskgantt_core::{SortStrategy, ViewMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "taskgantt")]
#[command(author, version, about = "Gantt projection of a task list", long_about = None)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ./taskgantt.toml if present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the projection
    Show {
        /// Task file (JSON)
        #[arg(short, long, value_name = "FILE")]
        tasks: Option<PathBuf>,

        /// Sort strategy (default, startDate, dueDate, name)
        #[arg(short, long)]
        sort: Option<SortStrategy>,

        /// Reference instant, "YYYY-MM-DD[ HH:MM]" (default: local now)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Table)]
        format: ShowFormat,
    },

    /// Render a Gantt chart
    Render {
        /// Task file (JSON)
        #[arg(short, long, value_name = "FILE")]
        tasks: Option<PathBuf>,

        /// Sort strategy (default, startDate, dueDate, name)
        #[arg(short, long)]
        sort: Option<SortStrategy>,

        /// Time-axis granularity (day, week, month)
        #[arg(long)]
        view: Option<ViewMode>,

        /// Reference instant, "YYYY-MM-DD[ HH:MM]" (default: local now)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: RenderFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Move a task bar and write the task file back
    Reschedule {
        /// Entry id of the task
        id: String,

        /// New start, "YYYY-MM-DD[ HH:MM]"
        #[arg(value_parser = parse_now)]
        start: NaiveDateTime,

        /// New end, "YYYY-MM-DD[ HH:MM]"
        #[arg(value_parser = parse_now)]
        end: NaiveDateTime,

        /// Task file (JSON)
        #[arg(short, long, value_name = "FILE")]
        tasks: Option<PathBuf>,
    },

    /// Collapse or expand a project header
    Toggle {
        /// Project id, e.g. project-0-Work
        project_id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShowFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RenderFormat {
    Svg,
    Mermaid,
}

fn parse_now(raw: &str) -> Result<NaiveDateTime, String> {
    taskgantt_core::dates::parse_instant(raw)
        .ok_or_else(|| format!("expected YYYY-MM-DD or YYYY-MM-DD HH:MM, got '{}'", raw))
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Show { tasks, sort, now, format } => commands::show(
            &config,
            config.tasks_path(tasks),
            config.sort(sort),
            now.unwrap_or_else(local_now),
            format,
        ),
        Commands::Render {
            tasks,
            sort,
            view,
            now,
            format,
            output,
        } => commands::render(
            &config,
            commands::RenderArgs {
                tasks: config.tasks_path(tasks),
                sort: config.sort(sort),
                view: config.view(view),
                now: now.unwrap_or_else(local_now),
                format,
                output,
            },
        ),
        Commands::Reschedule { id, start, end, tasks } => {
            commands::reschedule(config.tasks_path(tasks), &id, start, end)
        }
        Commands::Toggle { project_id } => commands::toggle(&config, &project_id),
    }
}
