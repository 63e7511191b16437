// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rl - runlane CLI

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod env;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{daemon, status, trigger};
use output::OutputFormat;

use crate::client::DaemonClient;

#[derive(Parser)]
#[command(
    name = "rl",
    version,
    about = "runlane - CI run deduplication and cancellation"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a pull-request trigger
    Trigger(trigger::TriggerArgs),
    /// Show the daemon's active runs
    Status,
    /// Check that the daemon is responding
    Ping,
    /// Stop the daemon, cancelling active runs
    Shutdown,
}

fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            cli_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    match command {
        // Status reports a missing daemon instead of failing
        Commands::Status => status::handle(format).await?,
        Commands::Trigger(args) => {
            let client = DaemonClient::connect()?;
            trigger::handle(args, &client, format).await?
        }
        Commands::Ping => {
            let client = DaemonClient::connect()?;
            daemon::ping(&client, format).await?
        }
        Commands::Shutdown => {
            let client = DaemonClient::connect()?;
            daemon::shutdown(&client, format).await?
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
