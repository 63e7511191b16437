// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger handling: admission, supersession and run start

use super::Runtime;
use crate::error::RuntimeError;
use crate::plan::build_plan;
use rl_adapters::{RunExecutor, StatusReporter};
use rl_core::{Effect, Event, IdGen, Outcome, PipelineKind, TriggerEvent};

impl<X, R, G> Runtime<X, R, G>
where
    X: RunExecutor,
    R: StatusReporter,
    G: IdGen,
{
    /// Admit one run per requested pipeline.
    ///
    /// An empty request means every configured pipeline. Runs that fail to
    /// start come back as `RunFinished` failures so their slot is freed and
    /// the failure gets reported.
    pub(crate) async fn handle_trigger(
        &self,
        trigger: &TriggerEvent,
        requested: &[PipelineKind],
    ) -> Result<Vec<Event>, RuntimeError> {
        if !self.config.accepts(trigger.kind()) {
            tracing::info!(%trigger, "event type not in filter, skipping");
            return Ok(Vec::new());
        }

        let pipelines = if requested.is_empty() {
            self.config.pipeline_kinds()
        } else {
            requested.to_vec()
        };
        if let Some(missing) = pipelines
            .iter()
            .find(|kind| self.config.pipeline(**kind).is_none())
        {
            return Err(RuntimeError::PipelineNotConfigured(*missing));
        }

        let mut follow_up = Vec::new();
        for pipeline in pipelines {
            let admission = self.scheduler.submit(trigger, pipeline);

            if let Some(previous) = admission.superseded {
                self.cancel_run(previous, Some(admission.handle.id().clone()))
                    .await;
            }

            let handle = admission.handle;
            let started = match build_plan(&self.config, &handle) {
                Ok(plan) => self
                    .executor
                    .execute(Effect::StartRun {
                        handle: handle.clone(),
                        plan,
                    })
                    .await
                    .map_err(RuntimeError::from),
                Err(e) => Err(e),
            };
            if let Err(e) = started {
                tracing::warn!(run_id = %handle.id(), error = %e, "run failed to start");
                follow_up.push(Event::RunFinished {
                    handle,
                    outcome: Outcome::Failure,
                });
            }
        }
        Ok(follow_up)
    }
}
