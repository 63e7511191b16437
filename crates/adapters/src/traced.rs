// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::executor::{ExecutorError, RunExecutor};
use crate::report::{ReportError, StatusReporter};
use async_trait::async_trait;
use rl_core::{Event, RunHandle, RunId, RunPlan, RunReport, RunStatus};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Wrapper that adds tracing to any RunExecutor
#[derive(Clone)]
pub struct TracedExecutor<X> {
    inner: X,
}

impl<X> TracedExecutor<X> {
    pub fn new(inner: X) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<X: RunExecutor> RunExecutor for TracedExecutor<X> {
    async fn start(
        &self,
        handle: RunHandle,
        plan: RunPlan,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<(), ExecutorError> {
        let span = tracing::info_span!(
            "executor.start",
            run_id = %handle.id(),
            key = %handle.key(),
            pipeline = %handle.pipeline(),
        );
        async {
            tracing::info!(steps = plan.steps.len(), "starting");
            let start = std::time::Instant::now();
            let result = self.inner.start(handle, plan, event_tx).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "run started"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn cancel(&self, run_id: &RunId) -> Result<(), ExecutorError> {
        let result = self.inner.cancel(run_id).await;
        tracing::info_span!("executor.cancel", run_id = %run_id).in_scope(|| match &result {
            Ok(()) => tracing::info!("cancellation signalled"),
            Err(e) => tracing::warn!(error = %e, "cancel failed"),
        });
        result
    }
}

/// Wrapper that logs every report before delegating
#[derive(Clone)]
pub struct TracedReporter<R> {
    inner: R,
}

impl<R> TracedReporter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: StatusReporter> StatusReporter for TracedReporter<R> {
    async fn report(&self, report: &RunReport) -> Result<(), ReportError> {
        match report.status {
            RunStatus::Failed => tracing::warn!(
                run_id = %report.run_id,
                key = %report.key,
                pipeline = %report.pipeline,
                trigger = %report.trigger,
                status = %report.status,
                "run finished"
            ),
            _ => tracing::info!(
                run_id = %report.run_id,
                key = %report.key,
                pipeline = %report.pipeline,
                trigger = %report.trigger,
                status = %report.status,
                "run finished"
            ),
        }
        let result = self.inner.report(report).await;
        if let Err(ref e) = result {
            tracing::error!(run_id = %report.run_id, error = %e, "report failed");
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
