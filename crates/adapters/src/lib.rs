// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: job execution, status reporting, git

mod env;
pub mod executor;
pub mod git;
pub mod report;
pub mod subprocess;
pub mod traced;

pub use executor::{ExecutorError, RunExecutor, ShellExecutor};
pub use git::{head_info, GitError, GitHead};
pub use report::{FileReporter, NoOpReporter, ReportError, StatusReporter};
pub use traced::{TracedExecutor, TracedReporter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use executor::{ExecutorCall, FakeExecutor};
#[cfg(any(test, feature = "test-support"))]
pub use report::FakeReporter;
