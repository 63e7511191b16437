// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn shutdown_cancels_active_runs() {
    let mut ctx = setup();
    let a = ctx.push("feature-a", "c1").await;
    let b = ctx.push("main", "m1").await;

    ctx.runtime.handle_event(Event::Shutdown).await.unwrap();

    let mut cancelled = ctx.executor.cancelled();
    cancelled.sort();
    assert_eq!(cancelled, vec![a.clone(), b]);
    assert_eq!(ctx.runtime.scheduler().active_count(), 0);

    // Results trickling in after shutdown are dropped
    ctx.finish(&a, Outcome::Success).await;
    let reports = ctx.reporter.reports();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.status == RunStatus::Cancelled));
}

#[tokio::test]
async fn drained_run_is_reported_as_cancelled() {
    let ctx = setup();
    let run_id = ctx.push("feature-x", "c1").await;

    ctx.runtime.handle_event(Event::Shutdown).await.unwrap();

    let reports = ctx.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].run_id, run_id);
    assert_eq!(reports[0].status, RunStatus::Cancelled);
    assert_eq!(reports[0].key, "build-test-feature-x-anysha");
}

#[tokio::test]
async fn shutdown_with_nothing_running_is_quiet() {
    let ctx = setup();
    ctx.runtime.handle_event(Event::Shutdown).await.unwrap();
    assert!(ctx.executor.calls().is_empty());
}
