// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rl ping` / `rl shutdown` - Daemon management commands

use anyhow::Result;
use serde_json::json;

use crate::client::DaemonClient;
use crate::output::{print_json, OutputFormat};

pub async fn ping(client: &DaemonClient, format: OutputFormat) -> Result<()> {
    client.ping().await?;
    let version = client.hello().await?;
    match format {
        OutputFormat::Text => println!("pong (rld {})", version),
        OutputFormat::Json => print_json(&json!({ "status": "ok", "version": version }))?,
    }
    Ok(())
}

pub async fn shutdown(client: &DaemonClient, format: OutputFormat) -> Result<()> {
    client.shutdown().await?;
    match format {
        OutputFormat::Text => println!("Daemon shutting down"),
        OutputFormat::Json => print_json(&json!({ "status": "shutting_down" }))?,
    }
    Ok(())
}
