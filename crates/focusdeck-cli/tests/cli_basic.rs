//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They run
//! against the dev data directory (FOCUSDECK_ENV=dev) so a developer's
//! real data is left alone.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusdeck-cli", "--"])
        .args(args)
        .env("FOCUSDECK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_pomodoro_status() {
    let (stdout, _stderr, code) = run_cli(&["pomodoro", "status"]);
    assert_eq!(code, 0, "Pomodoro status failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("status should print JSON");
    assert_eq!(parsed["type"], "pomodoro_snapshot");
}

#[test]
fn test_pomodoro_reset_all() {
    let (stdout, _stderr, code) = run_cli(&["pomodoro", "reset-all"]);
    assert_eq!(code, 0, "Pomodoro reset-all failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["completed_work_sessions"], 0);
    assert_eq!(parsed["phase"], "work");
    assert_eq!(parsed["is_running"], false);
}

#[test]
fn test_pomodoro_start_then_pause() {
    let _ = run_cli(&["pomodoro", "reset"]);
    let (_stdout, _stderr, code) = run_cli(&["pomodoro", "start"]);
    assert_eq!(code, 0, "Pomodoro start failed");
    let (_stdout, _stderr, code) = run_cli(&["pomodoro", "pause"]);
    assert_eq!(code, 0, "Pomodoro pause failed");
}

#[test]
fn test_reset_all_applies_config_changes() {
    let (_stdout, _stderr, code) = run_cli(&["config", "set", "pomodoro.work_minutes", "50"]);
    assert_eq!(code, 0, "Config set failed");

    // A previously persisted engine snapshot must not shadow the new
    // configuration once the timer is rebuilt.
    let (stdout, _stderr, code) = run_cli(&["pomodoro", "reset-all"]);
    assert_eq!(code, 0, "Pomodoro reset-all failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["remaining_secs"], 50 * 60);

    let _ = run_cli(&["config", "set", "pomodoro.work_minutes", "25"]);
    let _ = run_cli(&["pomodoro", "reset-all"]);
}

#[test]
fn test_countdown_status() {
    let (stdout, _stderr, code) = run_cli(&["countdown", "status"]);
    assert_eq!(code, 0, "Countdown status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["type"], "countdown_snapshot");
}

#[test]
fn test_config_get() {
    let (stdout, _stderr, code) = run_cli(&["config", "get", "pomodoro.work_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_stdout, _stderr, code) = run_cli(&["config", "get", "pomodoro.no_such_key"]);
    assert_ne!(code, 0, "Unknown key should fail");
}

#[test]
fn test_config_set() {
    let (stdout, _stderr, code) = run_cli(&["config", "set", "pomodoro.auto_advance", "false"]);
    assert_eq!(code, 0, "Config set failed");
    assert_eq!(stdout.trim(), "ok");
}

#[test]
fn test_config_list() {
    let (stdout, _stderr, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    assert!(stdout.contains("pomodoro"));
}

#[test]
fn test_config_set_bad_value_fails() {
    let (_stdout, stderr, code) =
        run_cli(&["config", "set", "pomodoro.auto_advance", "not_a_bool"]);
    assert_ne!(code, 0, "Bad value should fail");
    assert!(stderr.contains("error"));
}

#[test]
fn test_stats_today() {
    let (_stdout, _stderr, code) = run_cli(&["stats", "today"]);
    assert_eq!(code, 0, "Stats today failed");
}

#[test]
fn test_stats_prune_large_horizon() {
    // A horizon far beyond the chrono range must clamp, not panic.
    let (stdout, _stderr, code) = run_cli(&[
        "stats",
        "prune",
        "--older-than-hours",
        "18446744073709551615",
    ]);
    assert_eq!(code, 0, "Stats prune failed");
    assert!(stdout.contains("pruned"));
}

#[test]
fn test_stats_all() {
    let (stdout, _stderr, code) = run_cli(&["stats", "all"]);
    assert_eq!(code, 0, "Stats all failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("total_sessions").is_some());
}
