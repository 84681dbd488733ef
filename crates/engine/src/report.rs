// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown batch report built from the ledger alone.

use crate::error::EngineError;
use fanout_core::{Item, ItemStatus};
use fanout_storage::{Ledger, LedgerHandle};
use std::fmt::Write;
use std::path::Path;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const EMPTY_SECTION: &str = "_None_";

/// Load the ledger in `batch_dir` and render its report.
pub fn generate_report(batch_dir: &Path) -> Result<String, EngineError> {
    let ledger = LedgerHandle::open(batch_dir).load()?;
    Ok(render_report(&ledger))
}

/// Counts table followed by Completed, Failed and Remaining sections.
pub fn render_report(ledger: &Ledger) -> String {
    let summary = ledger.summary;
    let mut out = String::new();

    let _ = writeln!(out, "# Batch Report: {}\n", ledger.batch_id);
    let _ = writeln!(out, "**Created**: {}", ledger.created_at.format(TIME_FORMAT));
    let _ = writeln!(out, "**Updated**: {}", ledger.updated_at.format(TIME_FORMAT));
    let pattern = if ledger.config.pattern.is_empty() { "N/A" } else { &ledger.config.pattern };
    let _ = writeln!(out, "**Pattern**: `{pattern}`");
    let _ = writeln!(out, "**Parallel**: {}\n", ledger.config.parallel);

    out.push_str("## Summary\n\n");
    out.push_str("| Status | Count |\n");
    out.push_str("|--------|-------|\n");
    for (label, count) in [
        ("Total", summary.total),
        ("Done", summary.done),
        ("Failed", summary.failed),
        ("Pending", summary.pending),
        ("Active", summary.active),
    ] {
        let _ = writeln!(out, "| {label} | {count} |");
    }

    section(&mut out, "Completed Items", ledger.items_with(ItemStatus::Done), |item| {
        format!("- **{}**: {}", item.name, item.summary.as_deref().unwrap_or("No summary"))
    });
    section(&mut out, "Failed Items", ledger.items_with(ItemStatus::Failed), |item| {
        let reason = item.summary.as_deref().unwrap_or("Unknown error");
        match item.exit_code {
            Some(code) => format!("- **{}** (exit {code}): {reason}", item.name),
            None => format!("- **{}**: {reason}", item.name),
        }
    });
    let remaining = ledger.items.iter().filter(|item| !item.status.is_terminal());
    section(&mut out, "Remaining Items", remaining, |item| {
        format!("- {} ({})", item.name, item.status)
    });

    out
}

fn section<'a>(
    out: &mut String,
    title: &str,
    items: impl Iterator<Item = &'a Item>,
    line: impl Fn(&Item) -> String,
) {
    let _ = write!(out, "\n## {title}\n\n");
    let mut any = false;
    for item in items {
        out.push_str(&line(item));
        out.push('\n');
        any = true;
    }
    if !any {
        out.push_str(EMPTY_SECTION);
        out.push('\n');
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
