// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pull-request trigger events

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix stripped from fully qualified branch refs.
const HEADS_PREFIX: &str = "refs/heads/";

/// Branch name without a leading `refs/heads/`.
///
/// `refs/heads/team/x` becomes `team/x`; short names pass through.
pub fn branch_name(branch_ref: &str) -> &str {
    branch_ref.strip_prefix(HEADS_PREFIX).unwrap_or(branch_ref)
}

/// Errors raised while accepting a trigger at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("unknown event type '{0}' (expected one of: assigned, opened, synchronize, reopened)")]
    UnknownEventType(String),
    #[error("branch ref must not be empty")]
    EmptyBranch,
    #[error("commit hash must not be empty")]
    EmptyCommit,
}

/// Pull-request activity that starts pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Assigned,
    Opened,
    Synchronize,
    Reopened,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 4] = [
        TriggerKind::Assigned,
        TriggerKind::Opened,
        TriggerKind::Synchronize,
        TriggerKind::Reopened,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::Assigned => "assigned",
            TriggerKind::Opened => "opened",
            TriggerKind::Synchronize => "synchronize",
            TriggerKind::Reopened => "reopened",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKind {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TriggerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TriggerError::UnknownEventType(s.to_string()))
    }
}

/// One pull-request notification. Immutable once accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTrigger")]
pub struct TriggerEvent {
    #[serde(rename = "eventType")]
    kind: TriggerKind,
    branch_ref: String,
    commit_hash: String,
}

impl TriggerEvent {
    /// Build a trigger from already-typed parts.
    ///
    /// A `refs/heads/` prefix on the branch is dropped so that full refs and
    /// short names land in the same concurrency slot.
    pub fn new(
        kind: TriggerKind,
        branch_ref: impl Into<String>,
        commit_hash: impl Into<String>,
    ) -> Result<Self, TriggerError> {
        let branch_ref = branch_name(&branch_ref.into()).to_string();
        let commit_hash = commit_hash.into();
        if branch_ref.trim().is_empty() {
            return Err(TriggerError::EmptyBranch);
        }
        if commit_hash.trim().is_empty() {
            return Err(TriggerError::EmptyCommit);
        }
        Ok(Self {
            kind,
            branch_ref,
            commit_hash,
        })
    }

    /// Parse the raw `{eventType, branchRef, commitHash}` triple from the
    /// event source.
    pub fn parse(event_type: &str, branch_ref: &str, commit_hash: &str) -> Result<Self, TriggerError> {
        let kind = event_type.parse::<TriggerKind>()?;
        Self::new(kind, branch_ref, commit_hash)
    }

    pub fn kind(&self) -> TriggerKind {
        self.kind
    }

    pub fn branch(&self) -> &str {
        &self.branch_ref
    }

    pub fn commit(&self) -> &str {
        &self.commit_hash
    }
}

/// Unvalidated wire shape; deserialization goes through [`TriggerEvent::parse`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrigger {
    event_type: String,
    branch_ref: String,
    commit_hash: String,
}

impl TryFrom<RawTrigger> for TriggerEvent {
    type Error = TriggerError;

    fn try_from(raw: RawTrigger) -> Result<Self, Self::Error> {
        TriggerEvent::parse(&raw.event_type, &raw.branch_ref, &raw.commit_hash)
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}@{}", self.kind, self.branch_ref, self.commit_hash)
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
