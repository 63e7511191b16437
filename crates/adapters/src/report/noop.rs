// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op status reporter.

use super::{ReportError, StatusReporter};
use async_trait::async_trait;
use rl_core::RunReport;

/// Reporter that discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatusReporter for NoOpReporter {
    async fn report(&self, _report: &RunReport) -> Result<(), ReportError> {
        Ok(())
    }
}
