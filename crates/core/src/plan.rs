// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executable command sequence for a run

use serde::{Deserialize, Serialize};

/// One shell command within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedStep {
    pub name: String,
    /// Fully interpolated command line, run with `sh -c`
    pub command: String,
}

/// Ordered steps plus the environment they run with.
///
/// Steps run in order and the run stops at the first failing step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlan {
    pub steps: Vec<PlannedStep>,
    pub env: Vec<(String, String)>,
}

impl RunPlan {
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}
