// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Per-step timeout for pipeline commands (default: 60 minutes).
pub fn step_timeout() -> Duration {
    parse_duration_ms("RL_STEP_TIMEOUT_MS").unwrap_or(crate::subprocess::STEP_TIMEOUT)
}

/// Timeout for git queries (default: 10s).
pub fn git_timeout() -> Duration {
    parse_duration_ms("RL_GIT_TIMEOUT_MS").unwrap_or(crate::subprocess::GIT_TIMEOUT)
}
