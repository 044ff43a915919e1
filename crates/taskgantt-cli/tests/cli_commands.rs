//! End-to-end tests for the taskgantt binary
//!
//! Each test runs in its own temporary directory holding a copy of
//! `fixtures/tasks.json`, so the default config and state files resolve there.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const NOW: &str = "2024-01-03 12:00";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tasks.json")
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture(), dir.path().join("tasks.json")).unwrap();
    dir
}

fn taskgantt(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taskgantt"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to execute taskgantt")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "taskgantt failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn entry_ids(projection: &Value) -> Vec<String> {
    projection["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn show_json_default_order() {
    let dir = workspace();
    let out = stdout(&taskgantt(dir.path(), &["show", "--format", "json", "--now", NOW]));
    let projection: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(
        entry_ids(&projection),
        vec!["project-0-Home", "project-1-Work", "1", "2", "3", "4"]
    );
    assert_eq!(projection["sort"], "default");

    let work = &projection["entries"][1];
    assert_eq!(work["kind"], "project");
    assert_eq!(work["progress"], 75);
    assert_eq!(work["start"], "2024-01-01T00:00:00");
    assert_eq!(work["end"], "2024-01-05T00:00:00");

    let ship = &projection["entries"][3];
    assert_eq!(ship["parentId"], "project-1-Work");
    assert_eq!(ship["dependencyIds"], serde_json::json!(["1"]));

    // blank group label stays ungrouped
    assert!(projection["entries"][5].get("parentId").is_none());
}

#[test]
fn show_sorted_by_name_from_config() {
    let dir = workspace();
    fs::write(dir.path().join("taskgantt.toml"), "sort = \"name\"\n").unwrap();

    let out = stdout(&taskgantt(dir.path(), &["show", "-f", "json", "--now", NOW]));
    let projection: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(projection["sort"], "name");
    assert_eq!(
        entry_ids(&projection),
        vec!["3", "project-0-Home", "1", "4", "2", "project-1-Work"]
    );
}

#[test]
fn show_flag_overrides_config() {
    let dir = workspace();
    fs::write(dir.path().join("taskgantt.toml"), "sort = \"name\"\n").unwrap();

    let out = stdout(&taskgantt(
        dir.path(),
        &["show", "-f", "json", "--sort", "startDate", "--now", NOW],
    ));
    let projection: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(projection["sort"], "startDate");
}

#[test]
fn show_table_when_nothing_is_schedulable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tasks.json"), "[]").unwrap();

    let out = stdout(&taskgantt(dir.path(), &["show", "--now", NOW]));
    assert_eq!(out, "No tasks to display\n");
}

#[test]
fn render_mermaid_to_stdout() {
    let dir = workspace();
    let out = stdout(&taskgantt(
        dir.path(),
        &["render", "--format", "mermaid", "--view", "week", "--now", NOW],
    ));

    assert!(out.starts_with("gantt"));
    assert!(out.contains("section Home"));
    assert!(out.contains("section Work"));
    assert!(out.contains("Plan sprint :done, t1"));
    assert!(!out.contains("Someday"));
}

#[test]
fn render_svg_to_file() {
    let dir = workspace();
    let output = taskgantt(
        dir.path(),
        &["render", "-f", "svg", "-o", "chart.svg", "--now", NOW],
    );
    assert!(stdout(&output).is_empty());

    let svg = fs::read_to_string(dir.path().join("chart.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Ship release"));
    assert!(svg.contains("class=\"now\""));
}

#[test]
fn render_empty_projection_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = taskgantt(dir.path(), &["render", "-f", "svg", "--now", NOW]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No tasks to display"));
}

#[test]
fn toggle_collapses_then_expands() {
    let dir = workspace();

    let out = stdout(&taskgantt(dir.path(), &["toggle", "project-1-Work"]));
    assert_eq!(out, "project-1-Work collapsed\n");

    let svg = stdout(&taskgantt(dir.path(), &["render", "-f", "svg", "--now", NOW]));
    assert!(svg.contains("Work"));
    assert!(!svg.contains("Ship release"));
    assert!(svg.contains("Groceries"));

    let out = stdout(&taskgantt(dir.path(), &["toggle", "project-1-Work"]));
    assert_eq!(out, "project-1-Work expanded\n");

    let svg = stdout(&taskgantt(dir.path(), &["render", "-f", "svg", "--now", NOW]));
    assert!(svg.contains("Ship release"));
}

#[test]
fn reschedule_rewrites_task_file() {
    let dir = workspace();
    let out = stdout(&taskgantt(
        dir.path(),
        &["reschedule", "2", "2024-01-08 09:00", "2024-01-10"],
    ));
    assert_eq!(out, "2: 2024-01-08 09:00 -> 2024-01-10 00:00\n");

    let tasks: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tasks.json")).unwrap()).unwrap();
    let ship = &tasks[1];
    assert_eq!(ship["start_date"], "2024-01-08 09:00");
    assert_eq!(ship["due_date"], "2024-01-10 00:00");
    // untouched backend fields survive the write-back
    assert_eq!(ship["details"], "tag and publish");
    assert_eq!(ship["notification_minutes"], 15);
    assert_eq!(tasks.as_array().unwrap().len(), 5);
    // records without a due date or group keep the backend's string fields
    assert_eq!(tasks[4]["group"], "");
    assert_eq!(tasks[4]["due_date"], "2024-02-01");
    assert_eq!(tasks[2]["details"], "");
}

#[test]
fn reschedule_rejects_project_and_unknown_ids() {
    let dir = workspace();
    let before = fs::read_to_string(dir.path().join("tasks.json")).unwrap();

    for id in ["project-1-Work", "99"] {
        let output = taskgantt(dir.path(), &["reschedule", id, "2024-01-08", "2024-01-09"]);
        assert!(!output.status.success(), "{} should be rejected", id);
    }

    let output = taskgantt(dir.path(), &["reschedule", "2", "2024-01-09", "2024-01-08"]);
    assert!(!output.status.success());

    assert_eq!(fs::read_to_string(dir.path().join("tasks.json")).unwrap(), before);
}

#[test]
fn invalid_config_is_reported() {
    let dir = workspace();
    fs::write(dir.path().join("taskgantt.toml"), "colour = \"red\"\n").unwrap();

    let output = taskgantt(dir.path(), &["show", "--now", NOW]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}
