// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn summary(branch: &str, commit: &str) -> RunSummary {
    RunSummary {
        run_id: "0123456789abcdef".to_string(),
        pipeline: "build-test".to_string(),
        key: format!("build-test-{}-anysha", branch),
        event: "synchronize".to_string(),
        branch: branch.to_string(),
        commit: commit.to_string(),
    }
}

#[parameterized(
    seconds = { 42, "42s" },
    minutes = { 185, "3m 5s" },
    hours = { 7800, "2h 10m" },
    zero = { 0, "0s" },
)]
fn uptime_formatting(secs: u64, expected: &str) {
    assert_eq!(format_uptime(secs), expected);
}

#[test]
fn empty_runs_render_nothing() {
    assert_eq!(format_runs(&[]), "");
}

#[test]
fn runs_table_has_header_and_one_line_per_run() {
    let runs = vec![
        summary("feature-x", "aaaaaaaaaaaaaaaaaaaa"),
        summary("a-much-longer-branch-name", "bbbbbbbb"),
    ];
    let table = format_runs(&runs);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("RUN"));
    assert!(lines[1].contains("01234567 "));
    assert!(lines[1].contains("aaaaaaaaaaaa "));
    assert!(!lines[1].contains("aaaaaaaaaaaaa"));
    assert!(lines[2].contains("build-test-a-much-longer-branch-name-anysha"));
}

#[test]
fn runs_table_columns_align() {
    let runs = vec![summary("x", "c1"), summary("longer-branch", "c2")];
    let table = format_runs(&runs);
    let lines: Vec<&str> = table.lines().collect();

    let key_col = |line: &str| line.find("build-test-").unwrap();
    assert_eq!(key_col(lines[1]), key_col(lines[2]));
}
