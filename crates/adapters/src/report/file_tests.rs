// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rl_core::test_support::handle;
use rl_core::RunStatus;
use tempfile::TempDir;

fn finished(id: &str, status: RunStatus) -> RunReport {
    let run = handle(id, "feature-x", "c1");
    run.finish(status);
    RunReport::from_handle(&run)
}

#[tokio::test]
async fn appends_one_json_line_per_report() {
    let dir = TempDir::new().unwrap();
    let reporter = FileReporter::new(dir.path().join("history").join("runs.jsonl"));

    reporter
        .report(&finished("run-1", RunStatus::Succeeded))
        .await
        .unwrap();
    reporter
        .report(&finished("run-2", RunStatus::Failed))
        .await
        .unwrap();

    let contents = std::fs::read_to_string(reporter.path()).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["run_id"], "run-1");
    assert_eq!(lines[0]["status"], "succeeded");
    assert_eq!(lines[1]["status"], "failed");
    assert_eq!(lines[1]["pipeline"], "build-test");
    assert_eq!(lines[1]["trigger"]["branchRef"], "feature-x");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reports_from_spawned_tasks_stay_line_separated() {
    let dir = TempDir::new().unwrap();
    let reporter = FileReporter::new(dir.path().join("runs.jsonl"));

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let reporter = reporter.clone();
            tokio::spawn(async move {
                reporter
                    .report(&finished(&format!("run-{i}"), RunStatus::Cancelled))
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let contents = std::fs::read_to_string(reporter.path()).unwrap();
    let mut ids: Vec<String> = contents
        .lines()
        .map(|l| {
            let value: serde_json::Value = serde_json::from_str(l).unwrap();
            assert_eq!(value["status"], "cancelled");
            value["run_id"].as_str().unwrap().to_string()
        })
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
}
