// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline configuration.
//!
//! Loaded from a TOML file. Sections left out of the file keep their
//! defaults, which reproduce the stock build/test and style-check
//! pipelines.

use rl_core::{branch_name, KeyPolicy, PipelineKind, TriggerKind, UnknownPipeline, DEFAULT_MAIN_BRANCH};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fetches the triggering branch and checks out the exact commit
pub const CHECKOUT_COMMAND: &str =
    "git fetch --quiet origin ${branch} && git checkout --quiet --force ${commit}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    UnknownPipeline(#[from] UnknownPipeline),
    #[error("unknown event type in filter: {0}")]
    UnknownEvent(String),
    #[error("event filter is empty; no trigger would ever run")]
    NoEvents,
    #[error("main_branch must not be empty")]
    EmptyMainBranch,
    #[error("pipeline {0} has an empty workflow name")]
    EmptyWorkflow(PipelineKind),
    #[error("pipeline {0} has no steps")]
    NoSteps(PipelineKind),
    #[error("pipeline {0} has a step without a name")]
    EmptyStepName(PipelineKind),
    #[error("pipeline {pipeline} has duplicate step {step:?}")]
    DuplicateStep { pipeline: PipelineKind, step: String },
    #[error("step {step:?} of pipeline {pipeline} has no command")]
    EmptyCommand { pipeline: PipelineKind, step: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDef {
    pub name: String,
    pub run: String,
}

impl StepDef {
    pub fn new(name: impl Into<String>, run: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run: run.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineDef {
    /// Workflow name used in the concurrency key (defaults to the kind name)
    #[serde(default)]
    pub workflow: Option<String>,
    pub steps: Vec<StepDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    main_branch: Option<String>,
    events: Option<Vec<String>>,
    env: Option<BTreeMap<String, String>>,
    pipeline: Option<BTreeMap<String, PipelineDef>>,
}

/// Validated configuration shared by the scheduler, planner and daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    main_branch: String,
    events: Vec<TriggerKind>,
    env: BTreeMap<String, String>,
    pipelines: BTreeMap<PipelineKind, PipelineDef>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            main_branch: DEFAULT_MAIN_BRANCH.to_string(),
            events: TriggerKind::ALL.to_vec(),
            env: default_env(),
            pipelines: default_pipelines(),
        }
    }
}

fn default_env() -> BTreeMap<String, String> {
    [
        ("CARGO_TERM_COLOR", "always"),
        ("CARGO_INCREMENTAL", "0"),
        ("RUST_BACKTRACE", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_pipelines() -> BTreeMap<PipelineKind, PipelineDef> {
    let build_test = PipelineDef {
        workflow: None,
        steps: vec![
            StepDef::new("checkout", CHECKOUT_COMMAND),
            StepDef::new("build", "cargo build --verbose"),
            StepDef::new(
                "test",
                "cargo test --verbose --no-fail-fast --future-incompat-report",
            ),
        ],
    };
    let style_check = PipelineDef {
        workflow: None,
        steps: vec![
            StepDef::new("checkout", CHECKOUT_COMMAND),
            StepDef::new("fmt", "cargo fmt --all --check"),
        ],
    };
    BTreeMap::from([
        (PipelineKind::BuildTest, build_test),
        (PipelineKind::StyleCheck, style_check),
    ])
}

impl PipelineConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        // Compared against trigger branches, which arrive without refs/heads/
        let main_branch = match raw.main_branch {
            Some(name) => branch_name(&name).to_string(),
            None => defaults.main_branch,
        };
        if main_branch.trim().is_empty() {
            return Err(ConfigError::EmptyMainBranch);
        }

        let events = match raw.events {
            Some(names) => {
                let mut events = Vec::new();
                for name in names {
                    let kind: TriggerKind = name
                        .parse()
                        .map_err(|_| ConfigError::UnknownEvent(name.clone()))?;
                    if !events.contains(&kind) {
                        events.push(kind);
                    }
                }
                if events.is_empty() {
                    return Err(ConfigError::NoEvents);
                }
                events
            }
            None => defaults.events,
        };

        let pipelines = match raw.pipeline {
            Some(defs) if !defs.is_empty() => {
                let mut pipelines = BTreeMap::new();
                for (name, def) in defs {
                    let kind: PipelineKind = name.parse()?;
                    validate_pipeline(kind, &def)?;
                    pipelines.insert(kind, def);
                }
                pipelines
            }
            _ => defaults.pipelines,
        };

        Ok(Self {
            main_branch,
            events,
            env: raw.env.unwrap_or(defaults.env),
            pipelines,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), pipelines = config.pipelines.len(), "loaded pipeline config");
        Ok(config)
    }

    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }

    pub fn events(&self) -> &[TriggerKind] {
        &self.events
    }

    /// Whether triggers of this kind pass the event filter
    pub fn accepts(&self, kind: TriggerKind) -> bool {
        self.events.contains(&kind)
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn pipeline(&self, kind: PipelineKind) -> Option<&PipelineDef> {
        self.pipelines.get(&kind)
    }

    pub fn pipeline_kinds(&self) -> Vec<PipelineKind> {
        self.pipelines.keys().copied().collect()
    }

    /// Key derivation rules implied by this config.
    pub fn key_policy(&self) -> KeyPolicy {
        self.pipelines
            .iter()
            .fold(KeyPolicy::new(&self.main_branch), |policy, (kind, def)| {
                match &def.workflow {
                    Some(workflow) => policy.with_workflow(*kind, workflow),
                    None => policy,
                }
            })
    }
}

fn validate_pipeline(kind: PipelineKind, def: &PipelineDef) -> Result<(), ConfigError> {
    if def.workflow.as_deref().is_some_and(|w| w.trim().is_empty()) {
        return Err(ConfigError::EmptyWorkflow(kind));
    }
    if def.steps.is_empty() {
        return Err(ConfigError::NoSteps(kind));
    }
    let mut seen = HashSet::new();
    for step in &def.steps {
        if step.name.trim().is_empty() {
            return Err(ConfigError::EmptyStepName(kind));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(ConfigError::DuplicateStep {
                pipeline: kind,
                step: step.name.clone(),
            });
        }
        if step.run.trim().is_empty() {
            return Err(ConfigError::EmptyCommand {
                pipeline: kind,
                step: step.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
