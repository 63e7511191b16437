// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rl status` - Show the daemon's active runs

use anyhow::Result;
use serde::Serialize;

use crate::client::{ClientError, DaemonClient};
use crate::output::{format_runs, format_uptime, print_json, OutputFormat};
use rl_daemon::RunSummary;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum StatusView {
    NotRunning,
    Running {
        uptime_secs: u64,
        active: Vec<RunSummary>,
    },
}

pub async fn handle(format: OutputFormat) -> Result<()> {
    let view = match DaemonClient::connect() {
        Ok(client) => match client.status().await {
            Ok(status) => StatusView::Running {
                uptime_secs: status.uptime_secs,
                active: status.active,
            },
            Err(ClientError::DaemonNotRunning) => StatusView::NotRunning,
            Err(e) => return Err(e.into()),
        },
        Err(ClientError::DaemonNotRunning) => StatusView::NotRunning,
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Text => print!("{}", render_text(&view)),
    }
    Ok(())
}

fn render_text(view: &StatusView) -> String {
    match view {
        StatusView::NotRunning => "Daemon not running\n".to_string(),
        StatusView::Running {
            uptime_secs,
            active,
        } => {
            let mut out = format!(
                "Daemon running (uptime {}), {} active run{}\n",
                format_uptime(*uptime_secs),
                active.len(),
                if active.len() == 1 { "" } else { "s" }
            );
            if !active.is_empty() {
                out.push('\n');
                out.push_str(&format_runs(active));
            }
            out
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
