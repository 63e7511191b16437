// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

#[test]
fn help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("rl");
    let output = cmd.arg("--help").assert().success().get_output().clone();
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["trigger", "status", "ping", "shutdown"] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn unknown_event_type_fails() {
    let mut cmd = cargo_bin_cmd!("rl");
    cmd.args(["trigger", "--event", "closed", "--branch", "x", "--commit", "y"])
        .assert()
        .failure();
}

#[test]
fn status_without_daemon_reports_not_running() {
    let state = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("rl");
    let output = cmd
        .env("RL_STATE_DIR", state.path())
        .arg("status")
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Daemon not running\n");
}

#[test]
fn status_json_without_daemon() {
    let state = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("rl");
    let output = cmd
        .env("RL_STATE_DIR", state.path())
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "not_running");
}

#[test]
fn trigger_without_daemon_fails() {
    let state = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("rl");
    let output = cmd
        .env("RL_STATE_DIR", state.path())
        .args(["trigger", "-e", "opened", "-b", "feature-x", "-c", "abc"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Daemon not running"), "got: {stderr}");
}
