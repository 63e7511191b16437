// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::process::Command;

#[tokio::test]
async fn captures_stdout_of_successful_command() {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", "echo ready"]);
    let output = run_with_timeout(cmd, Duration::from_secs(5), "echo")
        .await
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ready");
}

#[tokio::test]
async fn nonzero_exit_is_returned_as_output() {
    let cmd = Command::new("false");
    let output = run_with_timeout(cmd, Duration::from_secs(5), "false")
        .await
        .unwrap();
    assert!(!output.status.success());
}

#[tokio::test]
async fn missing_binary_reports_description() {
    let cmd = Command::new("/nonexistent/rl-binary");
    let err = run_with_timeout(cmd, Duration::from_secs(5), "lookup")
        .await
        .unwrap_err();
    assert!(err.starts_with("lookup failed:"), "got: {err}");
}

#[tokio::test]
async fn elapsed_timeout_is_an_error() {
    let mut cmd = Command::new("sleep");
    cmd.arg("10");
    let err = run_with_timeout(cmd, Duration::from_millis(100), "slow query")
        .await
        .unwrap_err();
    assert!(err.contains("slow query timed out after 100ms"), "got: {err}");
}
