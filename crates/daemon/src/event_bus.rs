// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus between ingestion and the engine loop.
//!
//! Listener tasks and executor tasks push events; the single engine loop
//! reads them in arrival order.

use rl_core::Event;
use thiserror::Error;
use tokio::sync::mpsc;

/// Default queue depth before producers wait on the engine
pub const EVENT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Error)]
#[error("event bus closed")]
pub struct BusClosed;

/// Sending half of the event queue.
#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<Event>,
}

/// Receiving half, owned by the engine loop.
pub struct EventReader {
    rx: mpsc::Receiver<Event>,
}

impl EventBus {
    /// Create a bus; returns both the bus (for sending) and reader (for receiving).
    pub fn new(capacity: usize) -> (Self, EventReader) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, EventReader { rx })
    }

    /// Queue an event, waiting if the engine is behind.
    pub async fn send(&self, event: Event) -> Result<(), BusClosed> {
        tracing::trace!(event = %event.log_summary(), "queueing event");
        self.tx.send(event).await.map_err(|_| BusClosed)
    }

    /// Raw sender for components that emit events themselves (run executors).
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }
}

impl EventReader {
    /// Wait for the next event.
    ///
    /// Returns `None` when the bus is closed (all senders dropped).
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;
