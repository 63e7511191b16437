// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger ingestion: validate, filter, enqueue.

use rl_core::{Event, PipelineKind, TriggerEvent};
use rl_daemon::Response;
use tracing::info;

use super::ListenCtx;

fn rejected(reason: impl Into<String>) -> Response {
    let reason = reason.into();
    info!(%reason, "trigger rejected");
    Response::Rejected { reason }
}

/// Validate a trigger and queue it for the engine.
///
/// Unknown event types, filtered event types and unknown or unconfigured
/// pipelines are answered with `Rejected` and never reach the scheduler.
pub(super) async fn handle_trigger(
    ctx: &ListenCtx,
    event_type: &str,
    branch_ref: &str,
    commit_hash: &str,
    pipelines: &[String],
) -> Response {
    let trigger = match TriggerEvent::parse(event_type, branch_ref, commit_hash) {
        Ok(trigger) => trigger,
        Err(e) => return rejected(e.to_string()),
    };
    if !ctx.pipelines.accepts(trigger.kind()) {
        return rejected(format!("event type {} is filtered out", trigger.kind()));
    }

    let mut kinds = Vec::with_capacity(pipelines.len());
    for name in pipelines {
        let kind: PipelineKind = match name.parse() {
            Ok(kind) => kind,
            Err(e) => return rejected(format!("{e}")),
        };
        if ctx.pipelines.pipeline(kind).is_none() {
            return rejected(format!("pipeline {kind} is not configured"));
        }
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    let event = Event::TriggerReceived {
        trigger,
        pipelines: kinds,
    };
    match ctx.event_bus.send(event).await {
        Ok(()) => Response::Queued,
        Err(e) => Response::Error {
            message: e.to_string(),
        },
    }
}
