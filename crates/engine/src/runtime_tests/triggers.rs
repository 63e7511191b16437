// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn trigger_starts_every_configured_pipeline() {
    let ctx = setup();

    ctx.runtime
        .handle_event(Event::TriggerReceived {
            trigger: trigger("feature-x", "c1"),
            pipelines: vec![],
        })
        .await
        .unwrap();

    let starts: Vec<Vec<String>> = ctx
        .executor
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            ExecutorCall::Start { plan, .. } => Some(
                plan.step_names()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            ExecutorCall::Cancel { .. } => None,
        })
        .collect();
    assert_eq!(
        starts,
        vec![
            vec!["checkout", "build", "test"],
            vec!["checkout", "fmt"],
        ]
    );
    assert_eq!(ctx.runtime.scheduler().active_count(), 2);
}

#[tokio::test]
async fn trigger_can_target_one_pipeline() {
    let ctx = setup();
    ctx.push("feature-x", "c1").await;

    let active = ctx.runtime.scheduler().active_runs();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].pipeline(), PipelineKind::BuildTest);
}

#[tokio::test]
async fn plan_is_interpolated_for_the_trigger() {
    let ctx = setup();
    let run_id = ctx.push("feature-x", "abc123").await;

    let plan = ctx.executor.plan_for(run_id.as_str()).unwrap();
    assert_eq!(
        plan.steps[0].command,
        "git fetch --quiet origin feature-x && git checkout --quiet --force abc123"
    );
}

#[tokio::test]
async fn new_push_cancels_superseded_run() {
    let ctx = setup();
    let first = ctx.push("feature-x", "c1").await;
    let second = ctx.push("feature-x", "c2").await;

    assert_ne!(first, second);
    assert_eq!(ctx.executor.cancelled(), vec![first.clone()]);

    let active = ctx.runtime.scheduler().active_runs();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id(), &second);
}

#[tokio::test]
async fn superseded_run_is_reported_as_cancelled() {
    let ctx = setup();
    let first = ctx.push("feature-x", "c1").await;
    ctx.push("feature-x", "c2").await;

    let reports = ctx.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].run_id, first);
    assert_eq!(reports[0].status, RunStatus::Cancelled);
    assert_eq!(reports[0].trigger.commit(), "c1");
}

#[tokio::test]
async fn main_branch_pushes_are_not_cancelled() {
    let ctx = setup();
    ctx.push("main", "m1").await;
    ctx.push("main", "m2").await;

    assert!(ctx.executor.cancelled().is_empty());
    assert!(ctx.reporter.reports().is_empty());
    assert_eq!(ctx.runtime.scheduler().active_count(), 2);
}

#[tokio::test]
async fn filtered_event_type_is_skipped() {
    let config = PipelineConfig::parse(r#"events = ["opened"]"#).unwrap();
    let ctx = setup_with_config(config);
    let Ok(assigned) = TriggerEvent::parse("assigned", "feature-x", "c1") else {
        panic!("valid trigger");
    };

    let follow_up = ctx.runtime.handle_event(build_only(assigned)).await.unwrap();
    assert!(follow_up.is_empty());
    assert!(ctx.executor.calls().is_empty());
}

#[tokio::test]
async fn unconfigured_pipeline_is_rejected_before_admission() {
    let config =
        PipelineConfig::parse("[pipeline.build-test]\nsteps = [{ name = \"b\", run = \"make\" }]")
            .unwrap();
    let ctx = setup_with_config(config);

    let err = ctx
        .runtime
        .handle_event(Event::TriggerReceived {
            trigger: trigger("feature-x", "c1"),
            pipelines: vec![PipelineKind::BuildTest, PipelineKind::StyleCheck],
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::PipelineNotConfigured(PipelineKind::StyleCheck)
    ));
    assert_eq!(ctx.runtime.scheduler().active_count(), 0);
}

#[tokio::test]
async fn start_failure_becomes_failed_completion() {
    let ctx = setup();
    ctx.executor.set_fail_starts(true);

    let follow_up = ctx
        .runtime
        .handle_event(build_only(trigger("feature-x", "c1")))
        .await
        .unwrap();
    assert_eq!(follow_up.len(), 1);
    assert_eq!(follow_up[0].name(), "run:finished");

    for event in follow_up {
        ctx.runtime.handle_event(event).await.unwrap();
    }
    let reports = ctx.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].status, RunStatus::Failed);
    assert_eq!(ctx.runtime.scheduler().active_count(), 0);
}
