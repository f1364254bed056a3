//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_focusroom"))
        .args(args)
        .env("FOCUSROOM_DATA_DIR", data_dir)
        .env("FOCUSROOM_USER", "cli-user")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_session_start_and_stop() {
    let dir = tempfile::tempdir().unwrap();
    let started = run_json(dir.path(), &["session", "start", "--type", "focus", "--duration", "20:00"]);
    assert_eq!(started["duration"], 1200);
    assert_eq!(started["label"], "20m");
    let id = started["id"].as_str().unwrap().to_string();

    let recovered = run_json(dir.path(), &["session", "recover"]);
    assert_eq!(recovered["status"], "resume");

    let stopped = run_json(dir.path(), &["session", "stop", &id, "--elapsed", "90"]);
    assert_eq!(stopped["saved_partial"]["elapsed_seconds"], 90);

    let today = run_json(dir.path(), &["stats", "today"]);
    assert_eq!(today["focusSeconds"], 90);
    assert_eq!(today["sessionsCompleted"], 0);

    let recent = run_json(dir.path(), &["durations", "recent"]);
    assert_eq!(recent, serde_json::json!([1200]));
}

#[test]
fn test_checkin_quota() {
    let dir = tempfile::tempdir().unwrap();
    let status = run_json(dir.path(), &["checkin", "status"]);
    assert_eq!(status["limit"], 3);
    assert_eq!(status["minutesToNextBonus"], 30);

    for _ in 0..3 {
        run_json(dir.path(), &["checkin", "create"]);
    }
    let (_, stderr, code) = run_cli(dir.path(), &["checkin", "create"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Check-in limit reached"), "stderr: {stderr}");
}

#[test]
fn test_manual_time_rejects_bad_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["session", "manual", "--duration", "0"]);
    assert_ne!(code, 0);

    run_json(dir.path(), &["session", "manual", "--type", "break", "--duration", "5:00"]);
    let today = run_json(dir.path(), &["stats", "today"]);
    assert_eq!(today["breakSeconds"], 300);
    assert_eq!(today["checkinsAllowed"], 3);
}

#[test]
fn test_manual_checkin_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    for _ in 0..3 {
        run_json(dir.path(), &["checkin", "create"]);
    }
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["session", "manual", "--type", "checkin", "--duration", "5:00"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("create_checkin"), "unexpected error: {stderr}");

    let status = run_json(dir.path(), &["checkin", "status"]);
    assert_eq!(status["used"], 3);
    assert_eq!(status["limit"], 3);
}

#[test]
fn test_settings_lock_flow() {
    let dir = tempfile::tempdir().unwrap();
    let shown = run_json(dir.path(), &["settings", "show"]);
    assert_eq!(shown["settingsLocked"], true);

    let (_, _, code) = run_cli(dir.path(), &["settings", "set-interval", "45"]);
    assert_eq!(code, 1);

    run_json(dir.path(), &["settings", "unlock"]);
    let changed = run_json(dir.path(), &["settings", "set-interval", "45"]);
    assert_eq!(changed["checkinBonusInterval"], 45);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "presets.max_recent"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "presets.max_recent", "2"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "presets.max_recent"]);
    assert_eq!(stdout.trim(), "2");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_missing_user_is_unauthenticated() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_focusroom"))
        .args(["checkin", "status"])
        .env("FOCUSROOM_DATA_DIR", dir.path())
        .env_remove("FOCUSROOM_USER")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not authenticated"));
}

#[test]
fn test_duration_parse() {
    let dir = tempfile::tempdir().unwrap();
    let parsed = run_json(dir.path(), &["durations", "parse", "1:05:00"]);
    assert_eq!(parsed["seconds"], 3900);
    assert_eq!(parsed["countdown"], "01:05:00");
}
