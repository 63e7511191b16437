// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rl trigger` - Submit a pull-request trigger to the daemon

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rl_core::{PipelineKind, TriggerEvent, TriggerKind};
use serde::Serialize;

use crate::client::DaemonClient;
use crate::output::{print_json, OutputFormat};

#[derive(Args, Debug)]
pub struct TriggerArgs {
    /// Event type (assigned, opened, synchronize, reopened)
    #[arg(short, long)]
    pub event: TriggerKind,

    /// Branch name or full ref (refs/heads/...)
    #[arg(
        short,
        long,
        required_unless_present = "from_repo",
        conflicts_with = "from_repo"
    )]
    pub branch: Option<String>,

    /// Commit hash
    #[arg(
        short,
        long,
        required_unless_present = "from_repo",
        conflicts_with = "from_repo"
    )]
    pub commit: Option<String>,

    /// Take branch and commit from the HEAD of a local repository
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    pub from_repo: Option<PathBuf>,

    /// Pipeline to run (repeatable; default: all configured)
    #[arg(short, long = "pipeline", value_name = "KIND")]
    pub pipelines: Vec<PipelineKind>,
}

#[derive(Serialize)]
struct Queued<'a> {
    status: &'static str,
    event: TriggerKind,
    branch: &'a str,
    commit: &'a str,
    pipelines: Vec<String>,
}

pub async fn handle(args: TriggerArgs, client: &DaemonClient, format: OutputFormat) -> Result<()> {
    let trigger = resolve_trigger(&args).await?;
    client.trigger(&trigger, &args.pipelines).await?;

    match format {
        OutputFormat::Text => {
            let pipelines = if args.pipelines.is_empty() {
                "all pipelines".to_string()
            } else {
                join(&args.pipelines)
            };
            println!(
                "Queued {} on {} @ {} ({})",
                trigger.kind(),
                trigger.branch(),
                trigger.commit(),
                pipelines
            );
        }
        OutputFormat::Json => print_json(&Queued {
            status: "queued",
            event: trigger.kind(),
            branch: trigger.branch(),
            commit: trigger.commit(),
            pipelines: args.pipelines.iter().map(|p| p.to_string()).collect(),
        })?,
    }
    Ok(())
}

/// Build the trigger from explicit flags or from a repository's HEAD.
pub async fn resolve_trigger(args: &TriggerArgs) -> Result<TriggerEvent> {
    let (branch, commit) = match &args.from_repo {
        Some(dir) => from_repo(dir).await?,
        None => (
            args.branch.clone().unwrap_or_default(),
            args.commit.clone().unwrap_or_default(),
        ),
    };
    Ok(TriggerEvent::new(args.event, branch, commit)?)
}

async fn from_repo(dir: &Path) -> Result<(String, String)> {
    let head = rl_adapters::head_info(dir)
        .await
        .with_context(|| format!("reading HEAD of {}", dir.display()))?;
    Ok((head.reference, head.commit))
}

fn join(kinds: &[PipelineKind]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
