//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temporary directory,
//! so every test starts from an empty data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studyplan-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("STUDYPLAN_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_task_add_list_toggle() {
    let home = tempfile::tempdir().unwrap();

    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 7);

    let task = run_json(home.path(), &["task", "add", "Read Ch.3", "--subject", "English"]);
    let id = task["id"].as_str().unwrap().to_string();
    assert_eq!(task["completed"], false);

    let toggled = run_json(home.path(), &["task", "toggle", &id]);
    assert_eq!(toggled["completed"], true);

    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 8);
}

#[test]
fn test_priority_cap_is_an_error() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["priority", "add", "Fourth"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Priority list is full"));

    let list = run_json(home.path(), &["priority", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[test]
fn test_dday_in_past_is_refused() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["dday", "add", "Quiz", "2025-05-01", "--today", "2025-06-01"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("in the past"));

    let dday = run_json(
        home.path(),
        &["dday", "add", "Finals", "2025-06-11", "--today", "2025-06-01"],
    );
    assert_eq!(dday["daysLeft"], 10);
}

#[test]
fn test_timer_tick_credits_study_time() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["timer", "start"]);
    let events = run_json(home.path(), &["timer", "tick", "--seconds", "1500"]);
    let events = events.as_array().unwrap();
    assert_eq!(events[0]["type"], "TimerCompleted");
    assert_eq!(events[0]["next_mode"], "shortBreak");

    let summary = run_json(home.path(), &["study", "summary"]);
    assert_eq!(summary["todayMinutes"], 25);
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.focus_duration"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.focus_duration", "50"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "timer.focus_duration"]);
    assert_eq!(stdout.trim(), "50");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_change_reaches_stored_timer() {
    let home = tempfile::tempdir().unwrap();
    let status = run_json(home.path(), &["timer", "status"]);
    assert_eq!(status[0]["remaining_secs"], 1500);

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.focus_duration", "50"]);
    assert_eq!(code, 0);
    let status = run_json(home.path(), &["timer", "status"]);
    assert_eq!(status[0]["remaining_secs"], 3000);
    assert_eq!(status[0]["total_secs"], 3000);
}

#[test]
fn test_missing_records_are_reported() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "toggle", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("task not found: nope"));

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key: timer.nope"));
}
