// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::CHECKOUT_COMMAND;
use rl_core::test_support::{handle, handle_for};
use rl_core::PipelineKind;
use yare::parameterized;

#[parameterized(
    plain = { "feature-x", "feature-x" },
    nested_branch = { "user/topic", "user/topic" },
    space = { "a b", "'a b'" },
    dollar = { "$(rm -rf /)", "'$(rm -rf /)'" },
    single_quote = { "it's", r"'it'\''s'" },
    semicolon = { "x;y", "'x;y'" },
    empty = { "", "''" },
)]
fn quotes_unsafe_values(input: &str, expected: &str) {
    assert_eq!(shell_quote(input), expected);
}

#[test]
fn interpolates_known_and_keeps_unknown() {
    let vars = HashMap::from([("branch", "feature x".to_string())]);
    assert_eq!(
        interpolate("echo ${branch} ${unknown} $HOME", &vars),
        "echo 'feature x' ${unknown} $HOME"
    );
}

#[test]
fn checkout_step_targets_trigger_commit() {
    let handle = handle("run-1", "refs/heads/feature-x", "abc123");
    let vars = run_vars(&handle);
    assert_eq!(
        interpolate(CHECKOUT_COMMAND, &vars),
        "git fetch --quiet origin feature-x && git checkout --quiet --force abc123"
    );
}

#[test]
fn plan_follows_configured_steps() {
    let config = PipelineConfig::default();
    let handle = handle("run-1", "feature-x", "abc123");

    let plan = build_plan(&config, &handle).unwrap();
    assert_eq!(plan.step_names(), vec!["checkout", "build", "test"]);
    assert_eq!(plan.steps[1].command, "cargo build --verbose");
}

#[test]
fn plan_env_carries_config_and_run_vars() {
    let config = PipelineConfig::default();
    let handle = handle_for("run-7", "main", "m1", PipelineKind::StyleCheck);

    let plan = build_plan(&config, &handle).unwrap();
    let env: HashMap<&str, &str> = plan
        .env
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(env.get("CARGO_TERM_COLOR"), Some(&"always"));
    assert_eq!(env.get("RL_RUN_ID"), Some(&"run-7"));
    assert_eq!(env.get("RL_BRANCH"), Some(&"main"));
    assert_eq!(env.get("RL_COMMIT"), Some(&"m1"));
    assert_eq!(env.get("RL_EVENT"), Some(&"opened"));
    assert_eq!(env.get("RL_PIPELINE"), Some(&"style-check"));
    assert_eq!(env.get("RL_CONCURRENCY_KEY"), Some(&"style-check-main-m1"));
}

#[test]
fn unconfigured_pipeline_is_an_error() {
    let config =
        PipelineConfig::parse("[pipeline.build-test]\nsteps = [{ name = \"b\", run = \"make\" }]")
            .unwrap();
    let handle = handle_for("run-1", "feature-x", "c1", PipelineKind::StyleCheck);

    let err = build_plan(&config, &handle).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::PipelineNotConfigured(PipelineKind::StyleCheck)
    ));
}
