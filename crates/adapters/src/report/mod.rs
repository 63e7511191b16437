// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status reporting adapters

mod file;
mod noop;

pub use file::FileReporter;
pub use noop::NoOpReporter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeReporter;

use async_trait::async_trait;
use rl_core::RunReport;
use thiserror::Error;

/// Errors from report operations
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Observer of terminal run outcomes.
///
/// Called once per run when it reaches a terminal status: `Succeeded` or
/// `Failed` through a recorded completion, or `Cancelled` when superseded
/// or drained at shutdown. Late results of cancelled runs are not reported.
#[async_trait]
pub trait StatusReporter: Clone + Send + Sync + 'static {
    async fn report(&self, report: &RunReport) -> Result<(), ReportError>;
}
