// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::lifecycle::LifecycleError;

/// Resolve state directory: RL_STATE_DIR > XDG_STATE_HOME/runlane > ~/.local/state/runlane
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("RL_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("runlane"));
    }
    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/runlane"))
}

/// Explicit pipeline config file (RL_CONFIG)
pub fn config_path() -> Option<PathBuf> {
    std::env::var("RL_CONFIG").ok().map(PathBuf::from)
}

/// Directory pipelines run in: RL_WORKDIR > current directory
pub fn workdir() -> Result<PathBuf, LifecycleError> {
    match std::env::var("RL_WORKDIR") {
        Ok(dir) => Ok(PathBuf::from(dir)),
        Err(_) => Ok(std::env::current_dir()?),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
