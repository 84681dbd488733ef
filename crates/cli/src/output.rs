// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use fanout_core::{ItemStatus, Summary};
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

/// `"3 done, 1 failed, 2 pending"`; active items are mentioned only when present.
pub fn summary_line(summary: &Summary) -> String {
    let mut line =
        format!("{} done, {} failed, {} pending", summary.done, summary.failed, summary.pending);
    if summary.active > 0 {
        line.push_str(&format!(", {} active", summary.active));
    }
    line
}

/// Counts as a two-column table, one status per row.
pub fn summary_table(summary: &Summary) -> String {
    let mut table = format!("{:<8} {:>5}\n", "total", summary.total);
    for status in [ItemStatus::Pending, ItemStatus::Active, ItemStatus::Done, ItemStatus::Failed] {
        table.push_str(&format!("{:<8} {:>5}\n", status.to_string(), summary.count(status)));
    }
    table
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
