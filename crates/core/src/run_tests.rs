// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{handle, trigger};

#[test]
fn new_handle_starts_running() {
    let run = handle("run-1", "feature-x", "c1");
    assert_eq!(run.status(), RunStatus::Running);
    assert_eq!(run.id(), &RunId::new("run-1"));
    assert_eq!(run.key(), &ConcurrencyKey::new("build-test-feature-x-anysha"));
    assert_eq!(run.pipeline(), PipelineKind::BuildTest);
    assert_eq!(run.trigger(), &trigger("feature-x", "c1"));
}

#[test]
fn finish_moves_running_to_terminal_once() {
    let run = handle("run-1", "feature-x", "c1");
    assert!(run.finish(RunStatus::Cancelled));
    assert_eq!(run.status(), RunStatus::Cancelled);

    assert!(!run.finish(RunStatus::Succeeded));
    assert_eq!(run.status(), RunStatus::Cancelled);
}

#[test]
fn finish_refuses_running_as_a_target() {
    let run = handle("run-1", "feature-x", "c1");
    assert!(!run.finish(RunStatus::Running));
    assert_eq!(run.status(), RunStatus::Running);
}

#[test]
fn clones_share_status() {
    let run = handle("run-1", "feature-x", "c1");
    let observer = run.clone();
    run.finish(RunStatus::Failed);
    assert_eq!(observer.status(), RunStatus::Failed);
    assert_eq!(observer, run);
}

#[yare::parameterized(
    success = { Outcome::Success, RunStatus::Succeeded },
    failure = { Outcome::Failure, RunStatus::Failed },
)]
fn outcome_maps_to_terminal_status(outcome: Outcome, status: RunStatus) {
    assert_eq!(RunStatus::from(outcome), status);
    assert!(status.is_terminal());
}

#[test]
fn report_snapshots_current_status() {
    let run = handle("run-7", "main", "abc");
    run.finish(RunStatus::Succeeded);
    let report = RunReport::from_handle(&run);
    assert_eq!(report.run_id, "run-7");
    assert_eq!(report.key, "build-test-main-abc");
    assert_eq!(report.status, RunStatus::Succeeded);
}
