// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn run(branch: &str) -> RunSummary {
    RunSummary {
        run_id: "run-1".to_string(),
        pipeline: "style-check".to_string(),
        key: format!("style-check-{branch}-anysha"),
        event: "opened".to_string(),
        branch: branch.to_string(),
        commit: "abc".to_string(),
    }
}

#[test]
fn not_running_text() {
    assert_eq!(render_text(&StatusView::NotRunning), "Daemon not running\n");
}

#[test]
fn idle_daemon_has_no_table() {
    let view = StatusView::Running {
        uptime_secs: 5,
        active: vec![],
    };
    assert_eq!(
        render_text(&view),
        "Daemon running (uptime 5s), 0 active runs\n"
    );
}

#[test]
fn single_run_is_listed() {
    let view = StatusView::Running {
        uptime_secs: 90,
        active: vec![run("feature-x")],
    };
    let text = render_text(&view);
    assert!(text.starts_with("Daemon running (uptime 1m 30s), 1 active run\n"));
    assert!(text.contains("style-check-feature-x-anysha"));
}

#[test]
fn json_view_is_tagged() {
    let view = StatusView::Running {
        uptime_secs: 1,
        active: vec![run("b")],
    };
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["status"], "running");
    assert_eq!(value["active"][0]["branch"], "b");

    let value = serde_json::to_value(StatusView::NotRunning).unwrap();
    assert_eq!(value, serde_json::json!({ "status": "not_running" }));
}
