// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events consumed by the engine loop

use crate::pipeline::PipelineKind;
use crate::run::{Outcome, RunHandle};
use crate::trigger::TriggerEvent;

/// Events flowing through the daemon queue.
///
/// Ingestion produces `TriggerReceived`; executors produce `RunFinished`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A pull-request trigger passed ingestion.
    ///
    /// An empty `pipelines` list targets every configured pipeline.
    TriggerReceived {
        trigger: TriggerEvent,
        pipelines: Vec<PipelineKind>,
    },

    /// The executor finished (or gave up on) a run.
    RunFinished { handle: RunHandle, outcome: Outcome },

    /// Stop the engine loop, cancelling whatever is still running.
    Shutdown,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::TriggerReceived { .. } => "trigger:received",
            Event::RunFinished { .. } => "run:finished",
            Event::Shutdown => "shutdown",
        }
    }

    /// One-line description for logs.
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            Event::TriggerReceived { trigger, pipelines } if pipelines.is_empty() => {
                format!("{t} {trigger}")
            }
            Event::TriggerReceived { trigger, pipelines } => {
                let names: Vec<&str> = pipelines.iter().map(|p| p.as_str()).collect();
                format!("{t} {trigger} pipelines={}", names.join(","))
            }
            Event::RunFinished { handle, outcome } => {
                format!("{t} run={} key={} outcome={outcome:?}", handle.id(), handle.key())
            }
            Event::Shutdown => t.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
