// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::path::PathBuf;
use std::time::Duration;

use rl_core::{PipelineKind, TriggerEvent};
use rl_daemon::protocol::{self, ProtocolError};
use rl_daemon::{Request, Response, RunSummary, PROTOCOL_VERSION};
use thiserror::Error;
use tokio::net::UnixStream;

use crate::env;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running (start it with `rld`)")]
    DaemonNotRunning,

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Trigger rejected: {0}")]
    Rejected(String),

    #[error("Daemon error: {0}")]
    Daemon(String),

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,
}

/// Daemon status snapshot
pub struct DaemonStatus {
    pub uptime_secs: u64,
    pub active: Vec<RunSummary>,
}

/// Daemon client
pub struct DaemonClient {
    socket_path: PathBuf,
    timeout: Duration,
}

impl DaemonClient {
    /// Connect to the running daemon (no auto-start)
    pub fn connect() -> Result<Self, ClientError> {
        let socket_path = env::state_dir()?.join("daemon.sock");
        if !socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }
        Ok(Self {
            socket_path,
            timeout: env::timeout_ipc(),
        })
    }

    /// Send a request and receive a response
    pub async fn send(&self, request: &Request) -> Result<Response, ClientError> {
        let stream = match UnixStream::connect(&self.socket_path).await {
            Ok(stream) => stream,
            // Stale socket from a daemon that died without cleanup
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
                return Err(ClientError::DaemonNotRunning)
            }
            Err(e) => return Err(e.into()),
        };
        let (mut reader, mut writer) = stream.into_split();

        protocol::write_request(&mut writer, request, self.timeout).await?;
        let response = protocol::read_response(&mut reader, self.timeout).await?;
        match response {
            Response::Error { message } => Err(ClientError::Daemon(message)),
            response => Ok(response),
        }
    }

    pub async fn ping(&self) -> Result<(), ClientError> {
        match self.send(&Request::Ping).await? {
            Response::Pong => Ok(()),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Get daemon version via Hello handshake
    pub async fn hello(&self) -> Result<String, ClientError> {
        let request = Request::Hello {
            version: PROTOCOL_VERSION.to_string(),
        };
        match self.send(&request).await? {
            Response::Hello { version } => Ok(version),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Submit a trigger; `Ok` means the daemon queued it.
    pub async fn trigger(
        &self,
        trigger: &TriggerEvent,
        pipelines: &[PipelineKind],
    ) -> Result<(), ClientError> {
        let request = Request::Trigger {
            event_type: trigger.kind().to_string(),
            branch_ref: trigger.branch().to_string(),
            commit_hash: trigger.commit().to_string(),
            pipelines: pipelines.iter().map(|p| p.to_string()).collect(),
        };
        match self.send(&request).await? {
            Response::Queued => Ok(()),
            Response::Rejected { reason } => Err(ClientError::Rejected(reason)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn status(&self) -> Result<DaemonStatus, ClientError> {
        match self.send(&Request::Status).await? {
            Response::Status {
                uptime_secs,
                active,
            } => Ok(DaemonStatus {
                uptime_secs,
                active,
            }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Request daemon shutdown
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        match self.send(&Request::Shutdown).await? {
            Response::ShuttingDown => Ok(()),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }
}
