//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with an isolated data directory.

use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "mindfulness-cli", "--"])
        .args(args)
        .env("MINDFULNESS_HOME", home)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_zero_duration_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["breathe", "--duration", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid duration"), "stderr: {stderr}");
    assert!(!home.path().join("mindfulness_log.txt").exists());
}

#[test]
fn test_negative_duration_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["reflect", "--duration", "-5"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid duration"), "stderr: {stderr}");
}

#[test]
fn test_config_get_default() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "breathing.inhale_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "4");
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["config", "set", "reflection.question_pause_secs", "8"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) =
        run_cli(home.path(), &["config", "get", "reflection.question_pause_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "8");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "breathing.hold_secs"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"), "stderr: {stderr}");
}

#[test]
fn test_config_list_is_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["listing"]["think_secs"], 5);
}

#[test]
fn test_short_breathing_session_logs_once() {
    let home = tempfile::tempdir().unwrap();
    for key in ["session.get_ready_secs", "session.cool_down_secs", "session.summary_secs"] {
        let (_, _, code) = run_cli(home.path(), &["config", "set", key, "0"]);
        assert_eq!(code, 0);
    }

    let (stdout, _, code) = run_cli(home.path(), &["--json", "breathe", "--duration", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"type\":\"activity_completed\""), "stdout: {stdout}");

    let log = std::fs::read_to_string(home.path().join("mindfulness_log.txt")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("| Breathing Activity | Duration: 1 seconds"));
}
