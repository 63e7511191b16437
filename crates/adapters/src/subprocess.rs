// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default timeout for git queries.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for a single pipeline step.
/// Builds and test suites can be slow, so this is a safety net only.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Run a subprocess to completion with a timeout.
///
/// A non-zero exit is not an error; callers inspect `Output::status`.
/// The child is killed when the timeout elapses.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!(
            "{} timed out after {}ms",
            description,
            timeout.as_millis()
        )),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
