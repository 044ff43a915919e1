//! JSON task file
//!
//! The backend keeps its task list as a pretty-printed JSON array. A missing
//! file is an empty list; a malformed one is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{StoreError, TaskRecord};

/// Load the task list from `path`
pub fn load_tasks(path: &Path) -> Result<Vec<TaskRecord>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the task list to `path` as pretty JSON
pub fn save_tasks(tasks: &[TaskRecord], path: &Path) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(tasks).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the record with the same id, appending if it is new
pub fn upsert(tasks: &mut Vec<TaskRecord>, task: TaskRecord) {
    match tasks.iter_mut().find(|t| t.id == task.id) {
        Some(existing) => *existing = task,
        None => tasks.push(task),
    }
}
