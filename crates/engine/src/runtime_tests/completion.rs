// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn successful_run_is_reported() {
    assert_finished_run_is_reported(Outcome::Success, RunStatus::Succeeded).await;
}

#[tokio::test]
async fn failed_run_is_reported() {
    assert_finished_run_is_reported(Outcome::Failure, RunStatus::Failed).await;
}

async fn assert_finished_run_is_reported(outcome: Outcome, expected: RunStatus) {
    let mut ctx = setup();
    let run_id = ctx.push("feature-x", "c1").await;

    ctx.finish(&run_id, outcome).await;

    let reports = ctx.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].run_id, run_id);
    assert_eq!(reports[0].status, expected);
    assert_eq!(reports[0].key, "build-test-feature-x-anysha");
    assert_eq!(ctx.runtime.scheduler().active_count(), 0);
}

#[tokio::test]
async fn late_result_of_superseded_run_is_not_reported() {
    let mut ctx = setup();
    let first = ctx.push("feature-x", "c1").await;
    let second = ctx.push("feature-x", "c2").await;

    ctx.finish(&first, Outcome::Success).await;

    // Only the cancellation itself is on record
    let reports = ctx.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].run_id, first);
    assert_eq!(reports[0].status, RunStatus::Cancelled);
    let active = ctx.runtime.scheduler().active_runs();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id(), &second);
    assert_eq!(active[0].status(), RunStatus::Running);
}

#[tokio::test]
async fn duplicate_finish_reports_once() {
    let mut ctx = setup();
    let run_id = ctx.push("feature-x", "c1").await;

    ctx.finish(&run_id, Outcome::Success).await;
    ctx.finish(&run_id, Outcome::Failure).await;

    let reports = ctx.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].status, RunStatus::Succeeded);
}
