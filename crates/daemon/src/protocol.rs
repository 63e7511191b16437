// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IPC Protocol for daemon communication.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload

use rl_core::RunHandle;
use serde::{Deserialize, Serialize};

#[path = "protocol_wire.rs"]
mod wire;
pub use wire::{
    decode, encode, read_message, read_request, read_response, write_message, write_request,
    write_response, ProtocolError, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE, PROTOCOL_VERSION,
};

/// Request from CLI to daemon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Health check ping
    Ping,

    /// Version handshake
    Hello { version: String },

    /// Submit a pull-request trigger
    Trigger {
        event_type: String,
        branch_ref: String,
        commit_hash: String,
        /// Pipelines to run; empty means every configured pipeline
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pipelines: Vec<String>,
    },

    /// Get daemon status
    Status,

    /// Request daemon shutdown
    Shutdown,
}

/// Response from daemon to CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    /// Health check response
    Pong,

    /// Version handshake response
    Hello { version: String },

    /// Trigger accepted onto the event queue
    Queued,

    /// Trigger refused at ingestion; it never reaches the scheduler
    Rejected { reason: String },

    /// Daemon status
    Status {
        uptime_secs: u64,
        active: Vec<RunSummary>,
    },

    /// Daemon is shutting down
    ShuttingDown,

    /// Error response
    Error { message: String },
}

/// A running run, as shown by `rl status`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: String,
    pub pipeline: String,
    pub key: String,
    pub event: String,
    pub branch: String,
    pub commit: String,
}

impl From<&RunHandle> for RunSummary {
    fn from(handle: &RunHandle) -> Self {
        let trigger = handle.trigger();
        Self {
            run_id: handle.id().to_string(),
            pipeline: handle.pipeline().to_string(),
            key: handle.key().to_string(),
            event: trigger.kind().to_string(),
            branch: trigger.branch().to_string(),
            commit: trigger.commit().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
