// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Runtime;
use crate::error::RuntimeError;
use crate::scheduler::Completion;
use rl_adapters::{RunExecutor, StatusReporter};
use rl_core::{Effect, IdGen, Outcome, RunHandle, RunReport};

impl<X, R, G> Runtime<X, R, G>
where
    X: RunExecutor,
    R: StatusReporter,
    G: IdGen,
{
    pub(crate) async fn handle_run_finished(
        &self,
        handle: &RunHandle,
        outcome: Outcome,
    ) -> Result<(), RuntimeError> {
        match self.scheduler.complete(handle, outcome) {
            Completion::Recorded(_) => {
                let report = RunReport::from_handle(handle);
                self.executor.execute(Effect::Report { report }).await?;
            }
            Completion::Discarded => {
                tracing::debug!(
                    run_id = %handle.id(),
                    status = %handle.status(),
                    "ignoring result of superseded run"
                );
            }
        }
        Ok(())
    }
}
