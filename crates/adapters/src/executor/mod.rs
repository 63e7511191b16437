// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job execution adapters

mod shell;

pub use shell::ShellExecutor;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecutorCall, FakeExecutor};

use async_trait::async_trait;
use rl_core::{Event, RunHandle, RunId, RunPlan};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from executor operations
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("run {0} is already executing")]
    AlreadyRunning(RunId),
    #[error("failed to prepare run log: {0}")]
    Log(#[from] std::io::Error),
    #[error("start failed: {0}")]
    StartFailed(String),
}

/// Adapter that executes admitted runs.
///
/// `start` returns as soon as the run is underway; the outcome arrives later
/// as [`Event::RunFinished`] on `event_tx`. `cancel` is advisory: it asks the
/// run to stop and returns without waiting for it to exit.
#[async_trait]
pub trait RunExecutor: Clone + Send + Sync + 'static {
    async fn start(
        &self,
        handle: RunHandle,
        plan: RunPlan,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<(), ExecutorError>;

    async fn cancel(&self, run_id: &RunId) -> Result<(), ExecutorError>;
}
