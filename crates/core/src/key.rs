// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrency key derivation

use crate::pipeline::PipelineKind;
use crate::trigger::TriggerEvent;
use std::collections::BTreeMap;

/// Commit component used for every branch other than the main branch.
pub const ANY_SHA: &str = "anysha";

/// Branch whose runs are keyed per commit unless configured otherwise.
pub const DEFAULT_MAIN_BRANCH: &str = "main";

crate::define_id! {
    /// Slot identity shared by runs that must not execute concurrently.
    ///
    /// Format: `<workflow>-<branch>-<commit or "anysha">`.
    pub struct ConcurrencyKey;
}

/// Derives concurrency keys from triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPolicy {
    main_branch: String,
    workflows: BTreeMap<PipelineKind, String>,
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAIN_BRANCH)
    }
}

impl KeyPolicy {
    pub fn new(main_branch: impl Into<String>) -> Self {
        Self {
            main_branch: main_branch.into(),
            workflows: BTreeMap::new(),
        }
    }

    /// Override the workflow name used as the key prefix for `kind`.
    pub fn with_workflow(mut self, kind: PipelineKind, workflow: impl Into<String>) -> Self {
        self.workflows.insert(kind, workflow.into());
        self
    }

    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }

    /// Workflow name for `kind`, defaulting to the kind's own name.
    pub fn workflow(&self, kind: PipelineKind) -> &str {
        self.workflows
            .get(&kind)
            .map(String::as_str)
            .unwrap_or(kind.as_str())
    }

    /// Runs on the main branch are keyed by commit so successive merges all
    /// run to completion; any other branch collapses onto one key so a new
    /// push supersedes whatever was running.
    pub fn key_for(&self, trigger: &TriggerEvent, kind: PipelineKind) -> ConcurrencyKey {
        let branch = trigger.branch();
        let revision = if branch == self.main_branch {
            trigger.commit()
        } else {
            ANY_SHA
        };
        ConcurrencyKey::new(format!("{}-{}-{}", self.workflow(kind), branch, revision))
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
