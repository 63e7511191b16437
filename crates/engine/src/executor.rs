// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use rl_adapters::{ExecutorError, ReportError, RunExecutor, StatusReporter};
use rl_core::{Effect, Event};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

/// Executes effects using the configured adapters
pub struct Executor<X, R> {
    runs: X,
    reporter: R,
    /// Handed to the run executor so finished runs come back as events
    event_tx: mpsc::Sender<Event>,
}

impl<X, R> Executor<X, R>
where
    X: RunExecutor,
    R: StatusReporter,
{
    pub fn new(runs: X, reporter: R, event_tx: mpsc::Sender<Event>) -> Self {
        Self {
            runs,
            reporter,
            event_tx,
        }
    }

    /// Execute a single effect with tracing
    pub async fn execute(&self, effect: Effect) -> Result<(), ExecuteError> {
        let span = tracing::info_span!("effect", effect = effect.name());
        async move {
            tracing::info!(fields = ?effect.fields(), "executing");

            let start = std::time::Instant::now();
            let result = self.execute_inner(effect).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "completed"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn execute_inner(&self, effect: Effect) -> Result<(), ExecuteError> {
        match effect {
            Effect::StartRun { handle, plan } => {
                self.runs.start(handle, plan, self.event_tx.clone()).await?;
            }
            Effect::CancelRun { handle, .. } => {
                self.runs.cancel(handle.id()).await?;
            }
            Effect::Report { report } => {
                self.reporter.report(&report).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
