// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use crate::ExecuteError;
use rl_core::PipelineKind;
use thiserror::Error;

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("execute error: {0}")]
    Execute(#[from] ExecuteError),
    #[error("pipeline not configured: {0}")]
    PipelineNotConfigured(PipelineKind),
}
