// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::plan::PlannedStep;
use crate::run::RunStatus;
use crate::test_support::handle;

#[test]
fn start_run_fields_include_step_names() {
    let effect = Effect::StartRun {
        handle: handle("run-1", "feature-x", "c1"),
        plan: RunPlan {
            steps: vec![
                PlannedStep {
                    name: "checkout".into(),
                    command: "git checkout c1".into(),
                },
                PlannedStep {
                    name: "build".into(),
                    command: "cargo build".into(),
                },
            ],
            env: Vec::new(),
        },
    };
    assert_eq!(effect.name(), "start_run");
    assert!(effect
        .fields()
        .contains(&("steps", "checkout,build".to_string())));
}

#[test]
fn cancel_run_fields_name_the_superseding_run() {
    let effect = Effect::CancelRun {
        handle: handle("run-1", "feature-x", "c1"),
        superseded_by: Some(RunId::new("run-2")),
    };
    assert_eq!(effect.name(), "cancel_run");
    assert_eq!(
        effect.fields(),
        vec![
            ("run_id", "run-1".to_string()),
            ("key", "build-test-feature-x-anysha".to_string()),
            ("superseded_by", "run-2".to_string()),
        ]
    );
}

#[test]
fn report_fields_carry_status() {
    let run = handle("run-4", "main", "c4");
    run.finish(RunStatus::Failed);
    let effect = Effect::Report {
        report: RunReport::from_handle(&run),
    };
    assert!(effect.fields().contains(&("status", "failed".to_string())));
}
