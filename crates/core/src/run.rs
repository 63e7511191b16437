// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run identity, status and handles.

use crate::key::ConcurrencyKey;
use crate::pipeline::PipelineKind;
use crate::trigger::TriggerEvent;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

crate::define_id! {
    /// Unique identifier for one pipeline execution.
    pub struct RunId;
}

/// Result reported by the executor for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// Lifecycle state of a run.
///
/// `Running` is the only non-terminal state; a run never leaves a
/// terminal state once it reaches one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Cancelled,
    Succeeded,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

impl From<Outcome> for RunStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => RunStatus::Succeeded,
            Outcome::Failure => RunStatus::Failed,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Cancelled => write!(f, "cancelled"),
            RunStatus::Succeeded => write!(f, "succeeded"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug)]
struct RunInner {
    id: RunId,
    key: ConcurrencyKey,
    pipeline: PipelineKind,
    trigger: TriggerEvent,
    status: Mutex<RunStatus>,
}

/// Shared handle to a run owned by the scheduler.
///
/// Clones observe the same status cell. Equality is by run id.
#[derive(Debug, Clone)]
pub struct RunHandle {
    inner: Arc<RunInner>,
}

impl RunHandle {
    /// Create a handle for a freshly admitted run, in `Running`.
    pub fn new(
        id: RunId,
        key: ConcurrencyKey,
        pipeline: PipelineKind,
        trigger: TriggerEvent,
    ) -> Self {
        Self {
            inner: Arc::new(RunInner {
                id,
                key,
                pipeline,
                trigger,
                status: Mutex::new(RunStatus::Running),
            }),
        }
    }

    pub fn id(&self) -> &RunId {
        &self.inner.id
    }

    pub fn key(&self) -> &ConcurrencyKey {
        &self.inner.key
    }

    pub fn pipeline(&self) -> PipelineKind {
        self.inner.pipeline
    }

    pub fn trigger(&self) -> &TriggerEvent {
        &self.inner.trigger
    }

    pub fn status(&self) -> RunStatus {
        *self.inner.status.lock()
    }

    /// Move a running run into `to`.
    ///
    /// Returns false (and changes nothing) if the run is already terminal
    /// or `to` is `Running`.
    pub fn finish(&self, to: RunStatus) -> bool {
        if !to.is_terminal() {
            return false;
        }
        let mut status = self.inner.status.lock();
        if status.is_terminal() {
            return false;
        }
        *status = to;
        true
    }
}

impl PartialEq for RunHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for RunHandle {}

/// Terminal record handed to status reporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub key: ConcurrencyKey,
    pub pipeline: PipelineKind,
    pub trigger: TriggerEvent,
    pub status: RunStatus,
}

impl RunReport {
    pub fn from_handle(handle: &RunHandle) -> Self {
        Self {
            run_id: handle.id().clone(),
            key: handle.key().clone(),
            pipeline: handle.pipeline(),
            trigger: handle.trigger().clone(),
            status: handle.status(),
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
