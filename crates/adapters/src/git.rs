// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve branch and commit from a local repository's HEAD

use crate::subprocess::run_with_timeout;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("{0}")]
    Exec(String),
    #[error("git {args} failed: {stderr}")]
    Failed { args: String, stderr: String },
    #[error("HEAD is detached; check out a branch or pass --branch")]
    DetachedHead,
}

/// Branch and commit HEAD points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHead {
    /// Full symbolic ref, e.g. `refs/heads/feature-x`
    pub reference: String,
    pub commit: String,
}

/// Read HEAD of the repository containing `dir`.
pub async fn head_info(dir: &Path) -> Result<GitHead, GitError> {
    let timeout = crate::env::git_timeout();

    let symbolic = git(dir, &["symbolic-ref", "--quiet", "HEAD"], timeout).await?;
    let reference = match symbolic {
        GitOutput::Ok(reference) => reference,
        // symbolic-ref --quiet exits 1 without output when HEAD is detached
        GitOutput::Failed { code: Some(1), stderr } if stderr.is_empty() => {
            return Err(GitError::DetachedHead)
        }
        GitOutput::Failed { stderr, .. } => {
            return Err(GitError::Failed {
                args: "symbolic-ref HEAD".to_string(),
                stderr,
            })
        }
    };

    let commit = match git(dir, &["rev-parse", "--verify", "HEAD"], timeout).await? {
        GitOutput::Ok(commit) => commit,
        GitOutput::Failed { stderr, .. } => {
            return Err(GitError::Failed {
                args: "rev-parse HEAD".to_string(),
                stderr,
            })
        }
    };

    tracing::debug!(%reference, %commit, dir = %dir.display(), "resolved HEAD");
    Ok(GitHead { reference, commit })
}

enum GitOutput {
    Ok(String),
    Failed { code: Option<i32>, stderr: String },
}

async fn git(dir: &Path, args: &[&str], timeout: std::time::Duration) -> Result<GitOutput, GitError> {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(dir).args(args);
    let description = format!("git {}", args.join(" "));
    let output = run_with_timeout(cmd, timeout, &description)
        .await
        .map_err(GitError::Exec)?;
    if output.status.success() {
        Ok(GitOutput::Ok(
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        ))
    } else {
        Ok(GitOutput::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
