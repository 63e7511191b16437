// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rl_core::test_support::handle;

#[tokio::test]
async fn records_start_and_cancel() {
    let executor = FakeExecutor::new();
    let (tx, _rx) = mpsc::channel(4);
    let run = handle("run-1", "feature-x", "c1");

    executor
        .start(run.clone(), RunPlan::default(), tx)
        .await
        .unwrap();
    executor.cancel(run.id()).await.unwrap();

    assert_eq!(
        executor.calls(),
        vec![
            ExecutorCall::Start {
                run_id: RunId::new("run-1"),
                plan: RunPlan::default(),
            },
            ExecutorCall::Cancel {
                run_id: RunId::new("run-1"),
            },
        ]
    );
    assert_eq!(executor.cancelled(), vec![RunId::new("run-1")]);
    assert_eq!(executor.plan_for("run-1"), Some(RunPlan::default()));
}

#[tokio::test]
async fn finish_emits_run_finished() {
    let executor = FakeExecutor::new();
    let (tx, mut rx) = mpsc::channel(4);
    let run = handle("run-1", "feature-x", "c1");
    executor
        .start(run.clone(), RunPlan::default(), tx)
        .await
        .unwrap();

    assert!(executor.finish("run-1", Outcome::Success).await);
    assert_eq!(
        rx.recv().await,
        Some(Event::RunFinished {
            handle: run,
            outcome: Outcome::Success,
        })
    );
}

#[tokio::test]
async fn finish_for_unknown_run_returns_false() {
    let executor = FakeExecutor::new();
    assert!(!executor.finish("nope", Outcome::Failure).await);
}

#[tokio::test]
async fn failing_starts_are_still_recorded() {
    let executor = FakeExecutor::new();
    executor.set_fail_starts(true);
    let (tx, _rx) = mpsc::channel(4);

    let err = executor
        .start(handle("run-1", "main", "c1"), RunPlan::default(), tx)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutorError::StartFailed(_)));
    assert_eq!(executor.calls().len(), 1);
    assert!(!executor.finish("run-1", Outcome::Success).await);
}
