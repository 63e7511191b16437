// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::executor::{ExecutorCall, FakeExecutor};
use crate::report::FakeReporter;
use rl_core::test_support::handle;
use serial_test::serial;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run an async block with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

fn assert_log(logs: &str, label: &str, expected: &str) {
    assert!(logs.contains(expected), "Should log {label}. Logs:\n{logs}");
}

#[test]
#[serial(tracing)]
fn traced_start_logs_span_and_delegates() {
    let fake = FakeExecutor::new();
    let (logs, result) = with_tracing(|| async {
        let traced = TracedExecutor::new(fake.clone());
        let (tx, _rx) = mpsc::channel(1);
        traced
            .start(handle("run-1", "feature-x", "c1"), RunPlan::default(), tx)
            .await
    });

    assert!(result.is_ok());
    assert_log(&logs, "span name", "executor.start");
    assert_log(&logs, "key field", "build-test-feature-x-anysha");
    assert_log(&logs, "completion", "run started");
    assert_log(&logs, "timing", "elapsed_ms");
    assert!(matches!(fake.calls()[0], ExecutorCall::Start { .. }));
}

#[test]
#[serial(tracing)]
fn traced_start_logs_failure() {
    let fake = FakeExecutor::new();
    fake.set_fail_starts(true);
    let (logs, result) = with_tracing(|| async {
        let traced = TracedExecutor::new(fake.clone());
        let (tx, _rx) = mpsc::channel(1);
        traced
            .start(handle("run-1", "feature-x", "c1"), RunPlan::default(), tx)
            .await
    });

    assert!(result.is_err());
    assert_log(&logs, "failure", "start failed");
}

#[test]
#[serial(tracing)]
fn traced_cancel_logs_signal() {
    let fake = FakeExecutor::new();
    let (logs, result) = with_tracing(|| async {
        TracedExecutor::new(fake.clone())
            .cancel(&RunId::new("run-1"))
            .await
    });

    assert!(result.is_ok());
    assert_log(&logs, "cancel span", "executor.cancel");
    assert_log(&logs, "cancel message", "cancellation signalled");
    assert_eq!(fake.cancelled(), vec![RunId::new("run-1")]);
}

#[test]
#[serial(tracing)]
fn traced_reporter_logs_outcome_and_delegates() {
    let fake = FakeReporter::new();
    let run = handle("run-5", "main", "c5");
    run.finish(RunStatus::Failed);
    let report = RunReport::from_handle(&run);

    let (logs, result) = with_tracing(|| async {
        TracedReporter::new(fake.clone()).report(&report).await
    });

    assert!(result.is_ok());
    assert_log(&logs, "level", "WARN");
    assert_log(&logs, "message", "run finished");
    assert_log(&logs, "status", "status=failed");
    assert_eq!(fake.reports(), vec![report]);
}
