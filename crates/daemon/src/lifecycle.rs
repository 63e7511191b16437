// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fs2::FileExt;
use rl_adapters::{FileReporter, ShellExecutor, TracedExecutor, TracedReporter};
use rl_core::{Event, UuidIdGen};
use rl_engine::{ConfigError, PipelineConfig, Runtime, RuntimeDeps};
use rl_daemon::PROTOCOL_VERSION;
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::{info, warn};

use crate::env;
use crate::event_bus::{EventBus, EventReader, EVENT_QUEUE_CAPACITY};

/// Daemon runtime with concrete adapter types (wrapped with tracing)
pub type DaemonRuntime =
    Runtime<TracedExecutor<ShellExecutor>, TracedReporter<FileReporter>, UuidIdGen>;

/// Config file looked up in the state directory when RL_CONFIG is unset
pub const CONFIG_FILE_NAME: &str = "runlane.toml";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/runlane)
    pub state_dir: PathBuf,
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to version file
    pub version_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// JSON-lines history of terminal runs
    pub history_path: PathBuf,
    /// Path to per-run log files
    pub logs_path: PathBuf,
    /// Pipeline config file, if one should be loaded
    pub pipeline_config_path: Option<PathBuf>,
    /// Directory pipelines run in
    pub workdir: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        let mut config = Self::in_dir(env::state_dir()?, env::workdir()?);
        if let Some(path) = env::config_path() {
            config.pipeline_config_path = Some(path);
        }
        Ok(config)
    }

    /// Configuration rooted at `state_dir`, picking up `runlane.toml` there if present.
    pub fn in_dir(state_dir: PathBuf, workdir: PathBuf) -> Self {
        let default_config = state_dir.join(CONFIG_FILE_NAME);
        Self {
            socket_path: state_dir.join("daemon.sock"),
            lock_path: state_dir.join("daemon.pid"),
            version_path: state_dir.join("daemon.version"),
            log_path: state_dir.join("daemon.log"),
            history_path: state_dir.join("runs.jsonl"),
            logs_path: state_dir.join("logs"),
            pipeline_config_path: default_config.exists().then_some(default_config),
            workdir,
            state_dir,
        }
    }

    pub fn load_pipelines(&self) -> Result<PipelineConfig, LifecycleError> {
        match &self.pipeline_config_path {
            Some(path) => Ok(PipelineConfig::load(path)?),
            None => Ok(PipelineConfig::default()),
        }
    }
}

/// Daemon state during operation.
///
/// The listener is returned separately from startup to be spawned as a Listener task.
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub runtime: DaemonRuntime,
    pub event_bus: EventBus,
    pub start_time: Instant,
}

/// Result of daemon startup - includes both the daemon state and the listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    /// The Unix socket listener to spawn as a task
    pub listener: UnixListener,
    /// Event reader for the engine loop
    pub event_reader: EventReader,
}

impl DaemonState {
    /// Process an event and any follow-up events it produces.
    ///
    /// A failing event is logged and dropped; it never stops the loop.
    pub async fn process_event(&self, event: Event) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let name = event.name();
            match self.runtime.handle_event(event).await {
                Ok(follow_up) => pending.extend(follow_up),
                Err(e) => warn!(event = name, error = %e, "failed to process event"),
            }
        }
    }

    /// Shutdown the daemon gracefully, cancelling every active run.
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        self.process_event(Event::Shutdown).await;

        for path in [
            &self.config.socket_path,
            &self.config.lock_path,
            &self.config.version_path,
        ] {
            remove_if_exists(path);
        }

        // Lock file is released automatically when self.lock_file is dropped
        info!("Daemon shutdown complete");
        Ok(())
    }
}

fn remove_if_exists(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "failed to remove file");
        }
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    match startup_inner(config).await {
        Ok(result) => Ok(result),
        Err(e) => {
            // Files belong to the already-running daemon when the lock is taken
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

async fn startup_inner(config: &Config) -> Result<StartupResult, LifecycleError> {
    // 1. Create state directory (needed for socket, lock, etc.)
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock file FIRST - prevents races.
    // Open without truncating so a running daemon's PID survives a failed attempt.
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    use std::io::Write;
    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 3. Create directories and version file
    std::fs::create_dir_all(&config.logs_path)?;
    std::fs::write(&config.version_path, PROTOCOL_VERSION)?;

    // 4. Load pipelines before binding so a bad config never accepts triggers
    let pipelines = config.load_pipelines()?;
    info!(
        main_branch = pipelines.main_branch(),
        pipelines = ?pipelines.pipeline_kinds(),
        workdir = %config.workdir.display(),
        "loaded pipeline config"
    );

    // 5. Set up adapters (wrapped with tracing for observability)
    let executor = TracedExecutor::new(
        ShellExecutor::new(config.workdir.clone()).with_log_dir(config.logs_path.clone()),
    );
    let reporter = TracedReporter::new(FileReporter::new(config.history_path.clone()));

    // 6. Event queue shared by listener, executor tasks and engine loop
    let (event_bus, event_reader) = EventBus::new(EVENT_QUEUE_CAPACITY);

    let runtime = Runtime::new(
        RuntimeDeps { executor, reporter },
        pipelines,
        UuidIdGen,
        event_bus.sender(),
    );

    // 7. Remove stale socket and bind (LAST - only after all validation passes)
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    Ok(StartupResult {
        daemon: DaemonState {
            config: config.clone(),
            lock_file,
            runtime,
            event_bus,
            start_time: Instant::now(),
        },
        listener,
        event_reader,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    remove_if_exists(&config.socket_path);
    remove_if_exists(&config.version_path);
    remove_if_exists(&config.lock_path);
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
