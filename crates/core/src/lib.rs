// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rl-core: data model for the runlane run scheduler

pub mod effect;
pub mod event;
pub mod id;
pub mod key;
pub mod pipeline;
pub mod plan;
pub mod run;
pub mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use effect::Effect;
pub use event::Event;
pub use id::{IdGen, SequentialIdGen, ShortId, UuidIdGen};
pub use key::{ConcurrencyKey, KeyPolicy, ANY_SHA, DEFAULT_MAIN_BRANCH};
pub use pipeline::{PipelineKind, UnknownPipeline};
pub use plan::{PlannedStep, RunPlan};
pub use run::{Outcome, RunHandle, RunId, RunReport, RunStatus};
pub use trigger::{branch_name, TriggerError, TriggerEvent, TriggerKind};
