// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rl_core::test_support::trigger;

#[tokio::test]
async fn events_arrive_in_order() {
    let (bus, mut reader) = EventBus::new(8);

    bus.send(Event::TriggerReceived {
        trigger: trigger("feature-x", "c1"),
        pipelines: vec![],
    })
    .await
    .unwrap();
    bus.sender().send(Event::Shutdown).await.unwrap();

    assert_eq!(reader.recv().await.map(|e| e.name()), Some("trigger:received"));
    assert_eq!(reader.recv().await.map(|e| e.name()), Some("shutdown"));
}

#[tokio::test]
async fn reader_sees_close_when_senders_drop() {
    let (bus, mut reader) = EventBus::new(8);
    drop(bus);
    assert!(reader.recv().await.is_none());
}

#[tokio::test]
async fn send_fails_once_reader_is_gone() {
    let (bus, reader) = EventBus::new(8);
    drop(reader);
    assert!(bus.send(Event::Shutdown).await.is_err());
}
