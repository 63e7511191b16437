// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the runtime asks the executor to perform

use crate::plan::RunPlan;
use crate::run::{RunHandle, RunId, RunReport};

/// Side effects produced by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hand an admitted run to the job executor
    StartRun { handle: RunHandle, plan: RunPlan },

    /// Ask the executor to stop a superseded run (fire-and-forget)
    CancelRun {
        handle: RunHandle,
        superseded_by: Option<RunId>,
    },

    /// Publish a terminal run outcome
    Report { report: RunReport },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::StartRun { .. } => "start_run",
            Effect::CancelRun { .. } => "cancel_run",
            Effect::Report { .. } => "report",
        }
    }

    /// Key/value pairs recorded on the effect's tracing span.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::StartRun { handle, plan } => vec![
                ("run_id", handle.id().to_string()),
                ("key", handle.key().to_string()),
                ("pipeline", handle.pipeline().to_string()),
                ("steps", plan.step_names().join(",")),
            ],
            Effect::CancelRun {
                handle,
                superseded_by,
            } => {
                let mut fields = vec![
                    ("run_id", handle.id().to_string()),
                    ("key", handle.key().to_string()),
                ];
                if let Some(by) = superseded_by {
                    fields.push(("superseded_by", by.to_string()));
                }
                fields
            }
            Effect::Report { report } => vec![
                ("run_id", report.run_id.to_string()),
                ("pipeline", report.pipeline.to_string()),
                ("status", report.status.to_string()),
            ],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
