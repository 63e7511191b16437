// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! runlane daemon (rld)
//!
//! Background process that owns the run scheduler and executes pipelines.
//!
//! Architecture:
//! - Listener Task: Spawned task handling socket I/O, emits events to EventBus
//! - Engine Loop: Main task processing events sequentially

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod env;
mod event_bus;
mod lifecycle;
mod listener;

use std::sync::Arc;

use rl_daemon::PROTOCOL_VERSION;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;
use tracing::{error, info};

use crate::lifecycle::{Config, LifecycleError, StartupResult};
use crate::listener::{ListenCtx, Listener};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config/lock acquisition
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("rld {PROTOCOL_VERSION}");
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("rld {PROTOCOL_VERSION}");
                println!("runlane daemon - admits, cancels and runs CI pipelines for pull-request triggers");
                println!();
                println!("USAGE:");
                println!("    rld");
                println!();
                println!("Listens on a Unix socket in the state directory for requests");
                println!("from `rl`.");
                println!();
                println!("ENVIRONMENT:");
                println!("    RL_STATE_DIR         State directory (socket, logs, run history)");
                println!("    RL_CONFIG            Pipeline config file (default: <state>/runlane.toml)");
                println!("    RL_WORKDIR           Directory pipelines run in (default: cwd)");
                println!("    RL_STEP_TIMEOUT_MS   Per-step timeout (default: 60 minutes)");
                println!("    RUST_LOG             Log filter (default: info)");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: rld [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;

    // Write startup marker to log (before tracing setup, so CLI can find it)
    write_startup_marker(&config)?;

    let log_guard = setup_logging(&config)?;

    info!("Starting daemon");

    let StartupResult {
        mut daemon,
        listener: unix_listener,
        mut event_reader,
    } = match lifecycle::startup(&config).await {
        Ok(r) => r,
        Err(LifecycleError::LockFailed(_)) => {
            let pid = std::fs::read_to_string(&config.lock_path)
                .unwrap_or_default()
                .trim()
                .to_string();
            eprintln!("rld is already running");
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&config, &e);
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    let shutdown_notify = Arc::new(Notify::new());

    let listener = Listener::new(
        unix_listener,
        ListenCtx {
            event_bus: daemon.event_bus.clone(),
            scheduler: daemon.runtime.scheduler(),
            pipelines: daemon.runtime.config().clone(),
            start_time: daemon.start_time,
            shutdown: Arc::clone(&shutdown_notify),
        },
    );
    tokio::spawn(listener.run());

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        "Daemon ready, listening on {}",
        config.socket_path.display()
    );

    // Signal ready for parent process (e.g., systemd, CLI waiting for startup)
    println!("READY");

    // Engine loop - processes events sequentially
    loop {
        tokio::select! {
            event = event_reader.recv() => {
                match event {
                    Some(event) => daemon.process_event(event).await,
                    None => {
                        info!("Event bus closed, shutting down...");
                        break;
                    }
                }
            }

            _ = shutdown_notify.notified() => {
                info!("Shutdown requested via command");
                break;
            }

            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
        }
    }

    daemon.shutdown().await?;
    info!("Daemon stopped");
    Ok(())
}

/// Startup marker prefix written to log before anything else.
/// Full format: "--- rld: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- rld: starting (pid: ";

fn write_startup_marker(config: &Config) -> Result<(), LifecycleError> {
    use std::io::Write;

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to log file.
fn write_startup_error(config: &Config, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        config
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
