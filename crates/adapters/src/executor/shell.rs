// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor that runs plan steps as local shell commands

use super::{ExecutorError, RunExecutor};
use async_trait::async_trait;
use parking_lot::Mutex;
use rl_core::{Event, Outcome, PlannedStep, RunHandle, RunId, RunPlan};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

/// How a run's step loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepsEnd {
    Finished(Outcome),
    Cancelled,
}

/// Runs each step with `sh -c` in a fixed work directory.
///
/// Steps stop at the first non-zero exit, spawn failure, or timeout. Step
/// output goes to `<log_dir>/<run_id>.log` when a log directory is set.
#[derive(Clone)]
pub struct ShellExecutor {
    workdir: PathBuf,
    log_dir: Option<PathBuf>,
    step_timeout: Duration,
    cancels: Arc<Mutex<HashMap<RunId, oneshot::Sender<()>>>>,
}

impl ShellExecutor {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            log_dir: None,
            step_timeout: crate::env::step_timeout(),
            cancels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Number of runs currently executing.
    pub fn running(&self) -> usize {
        self.cancels.lock().len()
    }

    fn open_log(&self, run_id: &RunId) -> Result<Option<File>, ExecutorError> {
        let Some(dir) = &self.log_dir else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{}.log", run_id)))?;
        Ok(Some(file))
    }
}

#[async_trait]
impl RunExecutor for ShellExecutor {
    async fn start(
        &self,
        handle: RunHandle,
        plan: RunPlan,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<(), ExecutorError> {
        let run_id = handle.id().clone();
        let log = self.open_log(&run_id)?;

        let (cancel_tx, cancel_rx) = oneshot::channel();
        {
            let mut cancels = self.cancels.lock();
            if cancels.contains_key(&run_id) {
                return Err(ExecutorError::AlreadyRunning(run_id));
            }
            cancels.insert(run_id.clone(), cancel_tx);
        }

        let workdir = self.workdir.clone();
        let timeout = self.step_timeout;
        let cancels = Arc::clone(&self.cancels);
        tokio::spawn(async move {
            let end = run_steps(&run_id, &plan, &workdir, timeout, log, cancel_rx).await;
            cancels.lock().remove(&run_id);

            let outcome = match end {
                StepsEnd::Finished(outcome) => outcome,
                // Reported so the scheduler sees the late completion and
                // discards it; the slot has already moved on.
                StepsEnd::Cancelled => Outcome::Failure,
            };
            if event_tx
                .send(Event::RunFinished { handle, outcome })
                .await
                .is_err()
            {
                tracing::warn!(run_id = %run_id, "event channel closed before run finished");
            }
        });
        Ok(())
    }

    async fn cancel(&self, run_id: &RunId) -> Result<(), ExecutorError> {
        match self.cancels.lock().remove(run_id) {
            Some(tx) => {
                // Receiver gone means the run is already wrapping up
                let _ = tx.send(());
            }
            None => tracing::debug!(run_id = %run_id, "cancel for run that is not executing"),
        }
        Ok(())
    }
}

async fn run_steps(
    run_id: &RunId,
    plan: &RunPlan,
    workdir: &Path,
    timeout: Duration,
    mut log: Option<File>,
    mut cancel_rx: oneshot::Receiver<()>,
) -> StepsEnd {
    for step in &plan.steps {
        log_line(&mut log, &format!("=== {} ===", step.name));

        let mut child = match step_command(step, plan, workdir, log.as_ref()).spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(run_id = %run_id, step = %step.name, error = %e, "step spawn failed");
                log_line(&mut log, &format!("spawn failed: {e}"));
                return StepsEnd::Finished(Outcome::Failure);
            }
        };

        tokio::select! {
            waited = tokio::time::timeout(timeout, child.wait()) => match waited {
                Ok(Ok(status)) if status.success() => {
                    tracing::debug!(run_id = %run_id, step = %step.name, "step passed");
                }
                Ok(Ok(status)) => {
                    tracing::info!(run_id = %run_id, step = %step.name, code = ?status.code(), "step failed");
                    log_line(&mut log, &format!("step '{}' exited with {status}", step.name));
                    return StepsEnd::Finished(Outcome::Failure);
                }
                Ok(Err(e)) => {
                    tracing::warn!(run_id = %run_id, step = %step.name, error = %e, "wait failed");
                    return StepsEnd::Finished(Outcome::Failure);
                }
                Err(_elapsed) => {
                    tracing::warn!(run_id = %run_id, step = %step.name, timeout_ms = timeout.as_millis() as u64, "step timed out");
                    log_line(&mut log, &format!("step '{}' timed out", step.name));
                    kill_process_group(&child);
                    let _ = child.kill().await;
                    return StepsEnd::Finished(Outcome::Failure);
                }
            },
            _ = &mut cancel_rx => {
                tracing::info!(run_id = %run_id, step = %step.name, "cancelling step");
                log_line(&mut log, "cancelled");
                // Fire-and-forget: kill_on_drop reaps the child
                kill_process_group(&child);
                let _ = child.start_kill();
                return StepsEnd::Cancelled;
            }
        }
    }
    StepsEnd::Finished(Outcome::Success)
}

fn step_command(step: &PlannedStep, plan: &RunPlan, workdir: &Path, log: Option<&File>) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(&step.command)
        .current_dir(workdir)
        .envs(plan.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .kill_on_drop(true);
    // Own process group so cancel reaches everything the step forks
    #[cfg(unix)]
    cmd.process_group(0);
    match log.map(|f| (f.try_clone(), f.try_clone())) {
        Some((Ok(out), Ok(err))) => {
            cmd.stdout(Stdio::from(out)).stderr(Stdio::from(err));
        }
        _ => {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
    }
    cmd
}

/// SIGKILL the step's whole process group (the child is its leader).
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) else {
        return; // Already exited
    };
    match killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        Ok(()) | Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pid, error = %e, "SIGKILL to process group failed"),
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

fn log_line(log: &mut Option<File>, line: &str) {
    if let Some(file) = log {
        let _ = writeln!(file, "{line}");
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
