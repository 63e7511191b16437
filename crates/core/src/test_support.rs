// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{KeyPolicy, PipelineKind, RunHandle, RunId, TriggerEvent, TriggerKind};

/// `opened` trigger for `branch` at `commit`.
#[allow(clippy::expect_used)]
pub fn trigger(branch: &str, commit: &str) -> TriggerEvent {
    TriggerEvent::new(TriggerKind::Opened, branch, commit).expect("valid test trigger")
}

/// Running build-test handle keyed with the default policy.
pub fn handle(id: &str, branch: &str, commit: &str) -> RunHandle {
    handle_for(id, branch, commit, PipelineKind::BuildTest)
}

pub fn handle_for(id: &str, branch: &str, commit: &str, pipeline: PipelineKind) -> RunHandle {
    let trigger = trigger(branch, commit);
    let key = KeyPolicy::default().key_for(&trigger, pipeline);
    RunHandle::new(RunId::new(id), key, pipeline, trigger)
}
