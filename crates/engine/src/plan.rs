// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn an admitted run into the commands the executor runs.

use crate::config::PipelineConfig;
use crate::error::RuntimeError;
use regex::Regex;
use rl_core::{PlannedStep, RunHandle, RunPlan};
use std::collections::HashMap;
use std::sync::LazyLock;

/// `${name}` placeholders in step commands
#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-z_][a-z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// Quote a value for POSIX `sh` if it contains anything but safe characters.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Substitute known `${name}` placeholders with shell-quoted values.
///
/// Unknown placeholders are left as-is.
pub fn interpolate(template: &str, vars: &HashMap<&str, String>) -> String {
    VAR_PATTERN
        .replace_all(template, |caps: &regex::Captures| match vars.get(&caps[1]) {
            Some(val) => shell_quote(val),
            None => caps[0].to_string(),
        })
        .to_string()
}

/// Interpolation variables for a run.
pub fn run_vars(handle: &RunHandle) -> HashMap<&'static str, String> {
    let trigger = handle.trigger();
    HashMap::from([
        ("branch", trigger.branch().to_string()),
        ("commit", trigger.commit().to_string()),
        ("event", trigger.kind().to_string()),
        ("pipeline", handle.pipeline().to_string()),
        ("key", handle.key().to_string()),
        ("run_id", handle.id().to_string()),
    ])
}

pub fn build_plan(config: &PipelineConfig, handle: &RunHandle) -> Result<RunPlan, RuntimeError> {
    let def = config
        .pipeline(handle.pipeline())
        .ok_or(RuntimeError::PipelineNotConfigured(handle.pipeline()))?;
    let vars = run_vars(handle);

    let steps = def
        .steps
        .iter()
        .map(|step| PlannedStep {
            name: step.name.clone(),
            command: interpolate(&step.run, &vars),
        })
        .collect();

    let mut env: Vec<(String, String)> = config
        .env()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let trigger = handle.trigger();
    env.extend([
        ("RL_RUN_ID".to_string(), handle.id().to_string()),
        ("RL_BRANCH".to_string(), trigger.branch().to_string()),
        ("RL_COMMIT".to_string(), trigger.commit().to_string()),
        ("RL_EVENT".to_string(), trigger.kind().to_string()),
        ("RL_PIPELINE".to_string(), handle.pipeline().to_string()),
        ("RL_CONCURRENCY_KEY".to_string(), handle.key().to_string()),
    ]);

    Ok(RunPlan { steps, env })
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
