//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use fastlog_core::{Database, SlotStorage, STORAGE_KEY};
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_fastlog-cli"))
        .args(args)
        .env("FASTLOG_DATA_DIR", dir.path())
        .env("TZ", "UTC")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command, expect success and parse stdout as JSON.
fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("{args:?} printed non-JSON ({e}): {stdout}"))
}

fn first_fast_id(dir: &TempDir) -> String {
    let list = run_json(dir, &["log", "list", "--json"]);
    list[0]["id"].as_str().unwrap().to_string()
}

#[test]
fn test_start_then_end_logs_a_fast() {
    let dir = TempDir::new().unwrap();

    let started = run_json(&dir, &["fast", "start"]);
    assert_eq!(started["type"], "fast_started");

    let status = run_json(&dir, &["fast", "status"]);
    assert_eq!(status["active_fast"]["id"], started["id"]);

    let ended = run_json(&dir, &["fast", "end"]);
    assert_eq!(ended["type"], "fast_ended");
    assert_eq!(ended["fast"]["id"], started["id"]);

    let list = run_json(&dir, &["log", "list", "--json"]);
    let fasts = list.as_array().unwrap();
    assert_eq!(fasts.len(), 1);
    let fast = &fasts[0];
    assert_eq!(
        fast["duration"].as_i64().unwrap(),
        fast["endTime"].as_i64().unwrap() - fast["startTime"].as_i64().unwrap()
    );

    let status = run_json(&dir, &["fast", "status"]);
    assert!(status["active_fast"].is_null());
    assert_eq!(status["total_fasts"], 1);
}

#[test]
fn test_end_without_active_fast_is_noop() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(&dir, &["fast", "end"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("no active fast"));
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "state_snapshot");
    assert_eq!(snapshot["total_fasts"], 0);
}

#[test]
fn test_empty_log_and_summary() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["log", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No fasts yet"));

    let summary = run_json(&dir, &["stats", "summary"]);
    assert_eq!(summary["totalFasts"], 0);
    assert_eq!(summary["totalTime"], "0h");
    assert_eq!(summary["raw"]["totalFasts"], 0);
    assert!(summary["raw"].get("total_fasts").is_none());

    let distribution = run_json(&dir, &["stats", "distribution"]);
    assert!(distribution.as_array().unwrap().is_empty());
}

#[test]
fn test_edit_recomputes_duration_and_stats() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["fast", "start"]);
    run_json(&dir, &["fast", "end"]);
    let id = first_fast_id(&dir);

    let updated = run_json(
        &dir,
        &["log", "edit", &id, "--start", "2024-03-01T08:00", "--end", "2024-03-02T00:00"],
    );
    assert_eq!(updated["type"], "fast_updated");
    assert_eq!(updated["fast"]["duration"], 16 * 3_600_000_i64);

    let summary = run_json(&dir, &["stats", "summary"]);
    assert_eq!(summary["totalTime"], "16h 0m");
    assert_eq!(summary["longest"], "16h 0m");

    let bars = run_json(&dir, &["stats", "chart", "duration"]);
    assert_eq!(bars[0]["date"], "Mar 1");
    assert_eq!(bars[0]["durationHours"], 16.0);
    assert_eq!(bars[0]["meetsTarget"], true);

    let window = run_json(&dir, &["stats", "chart", "window"]);
    assert_eq!(window[0]["startLabel"], "8AM");
    assert_eq!(window[0]["endLabel"], "12AM");
    assert_eq!(window[0]["point"]["endHour"], 24.0);

    let distribution = run_json(&dir, &["stats", "distribution"]);
    assert_eq!(distribution[0]["label"], "16h - 20h");
    assert_eq!(distribution[0]["count"], 1);
}

#[test]
fn test_edit_rejects_bad_datetime() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["fast", "start"]);
    run_json(&dir, &["fast", "end"]);
    let id = first_fast_id(&dir);
    let before = run_json(&dir, &["log", "list", "--json"]);

    let (_, stderr, code) = run_cli(&dir, &["log", "edit", &id, "--start", "yesterday"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"), "{stderr}");

    let (_, _, code) = run_cli(&dir, &["log", "edit", &id]);
    assert_eq!(code, 1);

    assert_eq!(run_json(&dir, &["log", "list", "--json"]), before);
}

#[test]
fn test_delete_with_yes() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["fast", "start"]);
    run_json(&dir, &["fast", "end"]);
    let id = first_fast_id(&dir);

    let deleted = run_json(&dir, &["log", "delete", &id, "--yes"]);
    assert_eq!(deleted["type"], "fast_deleted");
    assert_eq!(deleted["id"], id.as_str());

    let (_, stderr, code) = run_cli(&dir, &["log", "delete", &id, "--yes"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("no fast with id"));
}

#[test]
fn test_set_start_moves_active_fast() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["fast", "start"]);
    let updated = run_json(&dir, &["fast", "set-start", "2024-03-01T08:00"]);
    assert_eq!(updated["type"], "active_fast_updated");
    assert_eq!(updated["active_fast"]["startTime"], 1_709_280_000_000_i64);
}

#[test]
fn test_watch_without_active_fast() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["fast", "watch", "--ticks", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Not fasting"));
}

#[test]
fn test_watch_prints_elapsed_ticks() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["fast", "start"]);
    let (stdout, stderr, code) = run_cli(&dir, &["fast", "watch", "--ticks", "2"]);
    assert_eq!(code, 0, "{stderr}");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Started "));
    assert!(lines[1].starts_with("00:00:"), "{}", lines[1]);
}

#[test]
fn test_corrupt_state_starts_empty() {
    let dir = TempDir::new().unwrap();
    {
        let db = Database::open_at(&dir.path().join("fastlog.db")).unwrap();
        db.write(STORAGE_KEY, "{not json").unwrap();
    }
    let status = run_json(&dir, &["fast", "status"]);
    assert!(status["active_fast"].is_null());
    assert_eq!(status["total_fasts"], 0);

    let started = run_json(&dir, &["fast", "start"]);
    assert_eq!(started["type"], "fast_started");
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "storage.key"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "fast-app-data");

    let (_, _, code) = run_cli(&dir, &["config", "set", "stats.percentile", "75"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "stats.percentile"]);
    assert_eq!(stdout.trim(), "75.0");

    let (_, stderr, code) = run_cli(&dir, &["config", "set", "stats.percentile", "101"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (_, _, code) = run_cli(&dir, &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
}
