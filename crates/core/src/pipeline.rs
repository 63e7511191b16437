// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pipeline '{0}' (expected build-test or style-check)")]
pub struct UnknownPipeline(pub String);

/// Which pipeline a run executes.
///
/// Kinds never share a slot in the active run table, so a build/test run
/// and a style-check run for the same branch do not cancel each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineKind {
    /// checkout, build, test
    BuildTest,
    /// checkout, format check
    StyleCheck,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 2] = [PipelineKind::BuildTest, PipelineKind::StyleCheck];

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineKind::BuildTest => "build-test",
            PipelineKind::StyleCheck => "style-check",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineKind {
    type Err = UnknownPipeline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipelineKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownPipeline(s.to_string()))
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
