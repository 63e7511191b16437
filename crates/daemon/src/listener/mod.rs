// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for handling socket I/O.
//!
//! The Listener runs in a spawned task, accepting connections and
//! handling them without blocking the engine loop. Accepted triggers are
//! pushed onto the EventBus for the engine; everything else is answered
//! directly.

mod trigger;

use std::sync::Arc;
use std::time::Instant;

use rl_core::UuidIdGen;
use rl_daemon::protocol::{self, Request, Response, RunSummary, DEFAULT_TIMEOUT, PROTOCOL_VERSION};
use rl_engine::{PipelineConfig, RunScheduler};
use thiserror::Error;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;
use tracing::{debug, error, warn};

use crate::event_bus::EventBus;

/// Shared state the listener answers requests from.
pub struct ListenCtx {
    pub event_bus: EventBus,
    pub scheduler: Arc<RunScheduler<UuidIdGen>>,
    pub pipelines: PipelineConfig,
    pub start_time: Instant,
    pub shutdown: Arc<Notify>,
}

/// Listener task for accepting socket connections.
pub struct Listener {
    socket: UnixListener,
    ctx: Arc<ListenCtx>,
}

/// Errors from connection handling.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),
}

impl Listener {
    pub fn new(socket: UnixListener, ctx: ListenCtx) -> Self {
        Self {
            socket,
            ctx: Arc::new(ctx),
        }
    }

    /// Run the listener loop until shutdown, spawning tasks for each connection.
    pub async fn run(self) {
        loop {
            match self.socket.accept().await {
                Ok((stream, _)) => {
                    let ctx = Arc::clone(&self.ctx);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &ctx).await {
                            match e {
                                ConnectionError::Protocol(
                                    protocol::ProtocolError::ConnectionClosed,
                                ) => debug!("Client disconnected"),
                                ConnectionError::Protocol(protocol::ProtocolError::Timeout) => {
                                    warn!("Connection timeout")
                                }
                                _ => error!("Connection error: {}", e),
                            }
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handle a single client connection.
async fn handle_connection(stream: UnixStream, ctx: &ListenCtx) -> Result<(), ConnectionError> {
    let (mut reader, mut writer) = stream.into_split();

    let request = protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await?;

    // Status is polled, so keep it out of the info log
    if matches!(request, Request::Status | Request::Ping) {
        debug!(request = ?request, "received request");
    } else {
        tracing::info!(request = ?request, "received request");
    }

    let response = handle_request(request, ctx).await;
    debug!("Sending response: {:?}", response);

    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;
    Ok(())
}

/// Handle a single request and return a response.
pub(crate) async fn handle_request(request: Request, ctx: &ListenCtx) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version } => {
            if version != PROTOCOL_VERSION {
                warn!(client = %version, daemon = PROTOCOL_VERSION, "client version mismatch");
            }
            Response::Hello {
                version: PROTOCOL_VERSION.to_string(),
            }
        }

        Request::Trigger {
            event_type,
            branch_ref,
            commit_hash,
            pipelines,
        } => trigger::handle_trigger(ctx, &event_type, &branch_ref, &commit_hash, &pipelines).await,

        Request::Status => Response::Status {
            uptime_secs: ctx.start_time.elapsed().as_secs(),
            active: ctx
                .scheduler
                .active_runs()
                .iter()
                .map(RunSummary::from)
                .collect(),
        },

        Request::Shutdown => {
            ctx.shutdown.notify_one();
            Response::ShuttingDown
        }
    }
}

#[cfg(test)]
#[path = "../listener_tests.rs"]
mod tests;
