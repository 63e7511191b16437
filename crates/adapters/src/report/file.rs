// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append run outcomes to a JSON-lines history file.

use super::{ReportError, StatusReporter};
use async_trait::async_trait;
use rl_core::RunReport;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Writes one JSON object per terminal run.
#[derive(Clone)]
pub struct FileReporter {
    path: PathBuf,
    // Serializes appends from concurrent completions
    write_lock: Arc<Mutex<()>>,
}

impl FileReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatusReporter for FileReporter {
    async fn report(&self, report: &RunReport) -> Result<(), ReportError> {
        let mut line = serde_json::to_vec(report)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
