// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake status reporter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ReportError, StatusReporter};
use async_trait::async_trait;
use parking_lot::Mutex;
use rl_core::RunReport;
use std::sync::Arc;

/// Records every report it receives
#[derive(Clone, Default)]
pub struct FakeReporter {
    reports: Arc<Mutex<Vec<RunReport>>>,
}

impl FakeReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<RunReport> {
        self.reports.lock().clone()
    }
}

#[async_trait]
impl StatusReporter for FakeReporter {
    async fn report(&self, report: &RunReport) -> Result<(), ReportError> {
        self.reports.lock().push(report.clone());
        Ok(())
    }
}
