// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake executor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ExecutorError, RunExecutor};
use async_trait::async_trait;
use parking_lot::Mutex;
use rl_core::{Event, Outcome, RunHandle, RunId, RunPlan};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Recorded executor call
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorCall {
    Start { run_id: RunId, plan: RunPlan },
    Cancel { run_id: RunId },
}

struct StartedRun {
    handle: RunHandle,
    event_tx: mpsc::Sender<Event>,
}

#[derive(Default)]
struct FakeExecutorState {
    calls: Vec<ExecutorCall>,
    started: HashMap<RunId, StartedRun>,
    fail_starts: bool,
}

/// Fake executor that records calls and lets tests finish runs on demand
#[derive(Clone, Default)]
pub struct FakeExecutor {
    inner: Arc<Mutex<FakeExecutorState>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.inner.lock().calls.clone()
    }

    /// Ids of runs that were cancelled, in call order
    pub fn cancelled(&self) -> Vec<RunId> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ExecutorCall::Cancel { run_id } => Some(run_id.clone()),
                ExecutorCall::Start { .. } => None,
            })
            .collect()
    }

    /// Plan passed to `start` for `run_id`
    pub fn plan_for(&self, run_id: &str) -> Option<RunPlan> {
        self.inner.lock().calls.iter().find_map(|call| match call {
            ExecutorCall::Start { run_id: id, plan } if id == &run_id => Some(plan.clone()),
            _ => None,
        })
    }

    /// Make every subsequent `start` fail
    pub fn set_fail_starts(&self, fail: bool) {
        self.inner.lock().fail_starts = fail;
    }

    /// Emit `RunFinished` for a started run, as a real executor would.
    ///
    /// Returns false if the run was never started.
    pub async fn finish(&self, run_id: &str, outcome: Outcome) -> bool {
        let started = {
            let inner = self.inner.lock();
            inner
                .started
                .get(run_id)
                .map(|run| (run.handle.clone(), run.event_tx.clone()))
        };
        match started {
            Some((handle, tx)) => tx.send(Event::RunFinished { handle, outcome }).await.is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl RunExecutor for FakeExecutor {
    async fn start(
        &self,
        handle: RunHandle,
        plan: RunPlan,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<(), ExecutorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ExecutorCall::Start {
            run_id: handle.id().clone(),
            plan,
        });
        if inner.fail_starts {
            return Err(ExecutorError::StartFailed("fake start failure".to_string()));
        }
        inner
            .started
            .insert(handle.id().clone(), StartedRun { handle, event_tx });
        Ok(())
    }

    async fn cancel(&self, run_id: &RunId) -> Result<(), ExecutorError> {
        self.inner.lock().calls.push(ExecutorCall::Cancel {
            run_id: run_id.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
