//! Configuration loading for the taskgantt CLI.
//!
//! Settings come from `taskgantt.toml` in the working directory, or the file
//! given with `--config`. Every key is optional. CLI flags override the file.
//!
//! ```toml
//! tasks = "tasks.json"
//! sort = "dueDate"
//! view = "week"
//! state = ".taskgantt-state.json"
//!
//! [svg]
//! chart_width = 1000
//! row_height = 24
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use taskgantt_core::{CollapseSet, SortStrategy, ViewMode};
use taskgantt_render::SvgRenderer;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "taskgantt.toml";
/// Task file used when neither flag nor config names one
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";
/// Collapse-set file used when the config names none
pub const DEFAULT_STATE_FILE: &str = ".taskgantt-state.json";

/// CLI configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Task file path
    pub tasks: Option<PathBuf>,
    /// Default sort strategy
    pub sort: Option<SortStrategy>,
    /// Default view mode
    pub view: Option<ViewMode>,
    /// Where the collapse set is persisted
    pub state: Option<PathBuf>,
    /// SVG chart geometry
    pub svg: SvgSection,
}

/// `[svg]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvgSection {
    pub chart_width: Option<u32>,
    pub row_height: Option<u32>,
}

impl SvgSection {
    /// Apply configured geometry to a renderer
    pub fn apply(&self, mut renderer: SvgRenderer) -> SvgRenderer {
        if let Some(width) = self.chart_width {
            renderer = renderer.chart_width(width);
        }
        if let Some(height) = self.row_height {
            renderer = renderer.row_height(height);
        }
        renderer
    }
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                match fs::read_to_string(path) {
                    Ok(content) => Self::parse(&content, path),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
                    Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Task file: flag, then config, then `tasks.json`
    pub fn tasks_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.tasks.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE))
    }

    pub fn sort(&self, flag: Option<SortStrategy>) -> SortStrategy {
        flag.or(self.sort).unwrap_or_default()
    }

    pub fn view(&self, flag: Option<ViewMode>) -> ViewMode {
        flag.or(self.view).unwrap_or_default()
    }

    pub fn state_path(&self) -> PathBuf {
        self.state
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE))
    }
}

/// Read the persisted collapse set; missing file means nothing collapsed
pub fn load_collapse_set(path: &Path) -> Result<CollapseSet> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("invalid collapse state {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(CollapseSet::new()),
        Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
    }
}

pub fn save_collapse_set(set: &CollapseSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(set)?;
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
}
