//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data
//! directory and verify outputs.

use std::path::PathBuf;
use std::process::Command;

/// Run a CLI command against `data_dir` and return (stdout, stderr, code).
fn run_cli(data_dir: &PathBuf, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusgate-cli", "--"])
        .args(args)
        .env("FOCUSGATE_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn temp_data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("focusgate-cli-test-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_status_json() {
    let dir = temp_data_dir("status");
    let (stdout, stderr, code) = run_cli(&dir, &["status", "--json"]);
    assert_eq!(code, 0, "status failed: {stderr}");

    let state: serde_json::Value = serde_json::from_str(&stdout).expect("status output is JSON");
    assert_eq!(state["isActive"], serde_json::json!(false));
    assert_eq!(state["blockedSites"].as_array().unwrap().len(), 6);
    assert_eq!(state["schedule"]["start"], serde_json::json!("09:00"));
}

#[test]
fn test_toggle_round_trip() {
    let dir = temp_data_dir("toggle");
    let (stdout, _, code) = run_cli(&dir, &["toggle"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("focus on"));

    let (stdout, _, code) = run_cli(&dir, &["toggle"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("focus off"));
}

#[test]
fn test_sites_add_and_remove() {
    let dir = temp_data_dir("sites");
    let (_, _, code) = run_cli(&dir, &["sites", "add", "https://www.Example.com/feed"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(&dir, &["sites", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("example.com"));

    let (_, _, code) = run_cli(&dir, &["sites", "remove", "example.com"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(&dir, &["sites", "list"]);
    assert!(!stdout.contains("example.com"));
}

#[test]
fn test_sites_add_rejects_invalid_domain() {
    let dir = temp_data_dir("invalid-site");
    let (_, stderr, code) = run_cli(&dir, &["sites", "add", "not a domain"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid domain"));
}

#[test]
fn test_schedule_set_rejects_malformed_time() {
    let dir = temp_data_dir("bad-schedule");
    let (_, stderr, code) = run_cli(&dir, &["schedule", "set", "9:00", "17:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid schedule time"));
}

#[test]
fn test_should_block_prints_bool() {
    let dir = temp_data_dir("should-block");
    let (stdout, _, code) = run_cli(&dir, &["should-block"]);
    assert_eq!(code, 0);
    // Fresh state: focus toggle off, so never blocking.
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_streak_break() {
    let dir = temp_data_dir("streak");
    let (stdout, _, code) = run_cli(&dir, &["streak", "break"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("streak 0"));
}
