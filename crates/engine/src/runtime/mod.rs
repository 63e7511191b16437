// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the runlane engine

mod finish;
mod trigger;

use crate::{
    config::PipelineConfig,
    error::RuntimeError,
    executor::Executor,
    scheduler::RunScheduler,
};
use rl_adapters::{RunExecutor, StatusReporter};
use rl_core::{Effect, Event, IdGen, RunHandle, RunId, RunReport, UuidIdGen};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runtime adapter dependencies
pub struct RuntimeDeps<X, R> {
    pub executor: X,
    pub reporter: R,
}

/// Runtime that turns events into scheduler decisions and effects
pub struct Runtime<X, R, G: IdGen = UuidIdGen> {
    pub(crate) executor: Executor<X, R>,
    pub(crate) scheduler: Arc<RunScheduler<G>>,
    pub(crate) config: PipelineConfig,
}

impl<X, R, G> Runtime<X, R, G>
where
    X: RunExecutor,
    R: StatusReporter,
    G: IdGen,
{
    pub fn new(
        deps: RuntimeDeps<X, R>,
        config: PipelineConfig,
        id_gen: G,
        event_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            executor: Executor::new(deps.executor, deps.reporter, event_tx),
            scheduler: Arc::new(RunScheduler::new(config.key_policy(), id_gen)),
            config,
        }
    }

    /// Shared handle to the scheduler (for status queries from the listener)
    pub fn scheduler(&self) -> Arc<RunScheduler<G>> {
        Arc::clone(&self.scheduler)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Handle one event; returns follow-up events for the caller to feed back in.
    pub async fn handle_event(&self, event: Event) -> Result<Vec<Event>, RuntimeError> {
        tracing::debug!(event = %event.log_summary(), "handling event");
        match event {
            Event::TriggerReceived { trigger, pipelines } => {
                self.handle_trigger(&trigger, &pipelines).await
            }
            Event::RunFinished { handle, outcome } => {
                self.handle_run_finished(&handle, outcome).await?;
                Ok(Vec::new())
            }
            Event::Shutdown => {
                self.handle_shutdown().await;
                Ok(Vec::new())
            }
        }
    }

    /// Cancel everything still running.
    async fn handle_shutdown(&self) {
        for handle in self.scheduler.drain() {
            self.cancel_run(handle, None).await;
        }
    }

    /// Stop a run the scheduler already marked `Cancelled` and report it.
    ///
    /// Cancellation is fire-and-forget; failures only get logged.
    async fn cancel_run(&self, handle: RunHandle, superseded_by: Option<RunId>) {
        let report = RunReport::from_handle(&handle);
        let run_id = handle.id().clone();
        let cancel = Effect::CancelRun {
            handle,
            superseded_by,
        };
        if let Err(e) = self.executor.execute(cancel).await {
            tracing::warn!(%run_id, error = %e, "failed to signal cancellation");
        }
        if let Err(e) = self.executor.execute(Effect::Report { report }).await {
            tracing::warn!(%run_id, error = %e, "failed to report cancelled run");
        }
    }
}

#[cfg(test)]
#[path = "../runtime_tests/mod.rs"]
mod tests;
