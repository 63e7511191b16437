// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! runlane engine: run admission, cancellation and effect execution

pub mod config;
mod error;
mod executor;
pub mod plan;
mod runtime;
mod scheduler;

pub use config::{ConfigError, PipelineConfig, PipelineDef, StepDef};
pub use error::RuntimeError;
pub use executor::{ExecuteError, Executor};
pub use runtime::{Runtime, RuntimeDeps};
pub use scheduler::{Admission, Completion, RunScheduler};
