// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use rl_daemon::RunSummary;
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an uptime as a compact duration, e.g. "42s", "3m 5s", "2h 10m".
pub fn format_uptime(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Render active runs as an aligned table. Empty input renders nothing.
pub fn format_runs(runs: &[RunSummary]) -> String {
    if runs.is_empty() {
        return String::new();
    }

    let headers = ["RUN", "PIPELINE", "EVENT", "BRANCH", "COMMIT", "KEY"];
    let rows: Vec<[String; 6]> = runs
        .iter()
        .map(|r| {
            [
                short(&r.run_id, 8).to_string(),
                r.pipeline.clone(),
                r.event.clone(),
                r.branch.clone(),
                short(&r.commit, 12).to_string(),
                r.key.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, w)| format!("{:<width$}", cell, width = w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
