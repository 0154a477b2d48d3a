//! Process-level checks that never reach the network.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn logger() -> Command {
    Command::new(env!("CARGO_BIN_EXE_evernote-logger"))
}

#[test]
fn test_short_day_exits_with_failure_code() {
    let output = logger().args(["--ymd", "2024011", "--test"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("yyyymmdd = 2024011"));
}

#[test]
fn test_impossible_date_exits_with_failure_code() {
    let output = logger().args(["--ymd", "20240230"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_flag_exits_with_usage_code() {
    let output = logger().arg("--verbose").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown argument"));
}

#[test]
fn test_missing_flag_value_exits_with_usage_code() {
    let output = logger().arg("--ymd").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: evernote-logger"));
}

#[test]
fn test_help_exits_cleanly() {
    let output = logger().arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage: evernote-logger"));
}

#[test]
fn test_missing_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = logger()
        .current_dir(dir.path())
        .args(["--ymd", "20240115", "-c", "missing.yaml", "--test"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_day_label_fails_before_connecting() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yaml");
    // Nothing listens on the discard port; the label check must fail first
    fs::write(
        &config,
        "userName: a\nauthToken: t\nnotebook: Auto\nserviceHost: http://127.0.0.1:9\ndays:\n  0: Sun\n",
    )
    .unwrap();

    let output = logger()
        .env("RUST_LOG", "error")
        .args(["--ymd", "20240115", "--test", "-c"])
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no label for weekday 1"));
}
