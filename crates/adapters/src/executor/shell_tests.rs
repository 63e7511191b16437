// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rl_core::test_support::handle;
use rl_core::RunStatus;
use tempfile::TempDir;

fn plan(steps: &[(&str, &str)]) -> RunPlan {
    RunPlan {
        steps: steps
            .iter()
            .map(|(name, command)| PlannedStep {
                name: name.to_string(),
                command: command.to_string(),
            })
            .collect(),
        env: vec![("RL_TEST_VALUE".to_string(), "from-env".to_string())],
    }
}

async fn next_finished(rx: &mut mpsc::Receiver<Event>) -> (RunHandle, Outcome) {
    let event = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("run should finish")
        .expect("channel open");
    match event {
        Event::RunFinished { handle, outcome } => (handle, outcome),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn all_steps_passing_reports_success() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path());
    let (tx, mut rx) = mpsc::channel(4);

    executor
        .start(
            handle("run-1", "feature-x", "c1"),
            plan(&[
                ("first", "echo one > first.txt"),
                ("second", "echo \"$RL_TEST_VALUE\" > second.txt"),
            ]),
            tx,
        )
        .await
        .unwrap();

    let (finished, outcome) = next_finished(&mut rx).await;
    assert_eq!(finished.id(), &RunId::new("run-1"));
    assert_eq!(outcome, Outcome::Success);
    let second = std::fs::read_to_string(dir.path().join("second.txt")).unwrap();
    assert_eq!(second.trim(), "from-env");
    assert_eq!(executor.running(), 0);
}

#[tokio::test]
async fn failing_step_stops_the_run() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path());
    let (tx, mut rx) = mpsc::channel(4);

    executor
        .start(
            handle("run-1", "feature-x", "c1"),
            plan(&[("build", "exit 3"), ("test", "touch should-not-exist")]),
            tx,
        )
        .await
        .unwrap();

    let (_, outcome) = next_finished(&mut rx).await;
    assert_eq!(outcome, Outcome::Failure);
    assert!(!dir.path().join("should-not-exist").exists());
}

#[tokio::test]
async fn step_timeout_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path()).with_step_timeout(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::channel(4);

    executor
        .start(handle("run-1", "feature-x", "c1"), plan(&[("slow", "sleep 10")]), tx)
        .await
        .unwrap();

    let (_, outcome) = next_finished(&mut rx).await;
    assert_eq!(outcome, Outcome::Failure);
}

#[tokio::test]
async fn cancel_stops_a_running_step_without_touching_status() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path());
    let (tx, mut rx) = mpsc::channel(4);
    let run = handle("run-1", "feature-x", "c1");

    executor
        .start(
            run.clone(),
            plan(&[("slow", "sleep 30"), ("after", "touch after-cancel")]),
            tx,
        )
        .await
        .unwrap();
    assert_eq!(executor.running(), 1);

    executor.cancel(run.id()).await.unwrap();

    let (finished, outcome) = next_finished(&mut rx).await;
    assert_eq!(finished, run);
    assert_eq!(outcome, Outcome::Failure);
    // Status transitions belong to the scheduler
    assert_eq!(run.status(), RunStatus::Running);
    assert!(!dir.path().join("after-cancel").exists());
    assert_eq!(executor.running(), 0);
}

/// Size of a file a background loop keeps appending to.
fn ticks(path: &Path) -> usize {
    std::fs::read_to_string(path).map(|s| s.len()).unwrap_or(0)
}

#[tokio::test]
async fn cancel_kills_processes_forked_by_the_step() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path());
    let (tx, mut rx) = mpsc::channel(4);
    let run = handle("run-1", "feature-x", "c1");

    executor
        .start(
            run.clone(),
            plan(&[(
                "forks",
                "(while true; do echo t >> ticks; sleep 0.05; done) & wait",
            )]),
            tx,
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(ticks(&dir.path().join("ticks")) > 0);

    executor.cancel(run.id()).await.unwrap();
    next_finished(&mut rx).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    let after_cancel = ticks(&dir.path().join("ticks"));
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(ticks(&dir.path().join("ticks")), after_cancel);
}

#[tokio::test]
async fn timeout_kills_processes_forked_by_the_step() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path()).with_step_timeout(Duration::from_millis(300));
    let (tx, mut rx) = mpsc::channel(4);

    executor
        .start(
            handle("run-1", "feature-x", "c1"),
            plan(&[(
                "forks",
                "(while true; do echo t >> ticks; sleep 0.05; done) & wait",
            )]),
            tx,
        )
        .await
        .unwrap();

    let (_, outcome) = next_finished(&mut rx).await;
    assert_eq!(outcome, Outcome::Failure);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let after_timeout = ticks(&dir.path().join("ticks"));
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(ticks(&dir.path().join("ticks")), after_timeout);
}

#[tokio::test]
async fn cancelling_an_unknown_run_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path());
    executor.cancel(&RunId::new("missing")).await.unwrap();
}

#[tokio::test]
async fn duplicate_start_is_rejected() {
    let dir = TempDir::new().unwrap();
    let executor = ShellExecutor::new(dir.path());
    let (tx, _rx) = mpsc::channel(4);
    let run = handle("run-1", "feature-x", "c1");

    executor
        .start(run.clone(), plan(&[("slow", "sleep 30")]), tx.clone())
        .await
        .unwrap();
    let err = executor
        .start(run.clone(), plan(&[("slow", "sleep 30")]), tx)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutorError::AlreadyRunning(_)), "got: {err:?}");

    executor.cancel(run.id()).await.unwrap();
}

#[tokio::test]
async fn step_output_is_written_to_the_run_log() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");
    let executor = ShellExecutor::new(dir.path()).with_log_dir(&logs);
    let (tx, mut rx) = mpsc::channel(4);

    executor
        .start(
            handle("run-9", "main", "c9"),
            plan(&[("fmt", "echo formatted; echo warned >&2")]),
            tx,
        )
        .await
        .unwrap();
    let (_, outcome) = next_finished(&mut rx).await;
    assert_eq!(outcome, Outcome::Success);

    let log = std::fs::read_to_string(logs.join("run-9.log")).unwrap();
    assert!(log.contains("=== fmt ==="), "log:\n{log}");
    assert!(log.contains("formatted"), "log:\n{log}");
    assert!(log.contains("warned"), "log:\n{log}");
}
