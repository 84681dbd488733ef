// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fanout status`: counts and per-item state of one batch.

use anyhow::Result;
use clap::Args;
use fanout_storage::{Ledger, LedgerHandle};
use serde_json::json;

use crate::color;
use crate::commands::BatchArg;
use crate::output::{print_json, summary_table, OutputFormat};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub batch: BatchArg,
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub fn handle(project: &Project, args: StatusArgs) -> Result<()> {
    let paths = project.batch(&args.batch.batch)?;
    let ledger = LedgerHandle::open(paths.dir()).load()?;

    match args.output {
        OutputFormat::Text => print!("{}", render_text(&ledger)),
        OutputFormat::Json => print_json(&json!({
            "batch_id": ledger.batch_id,
            "created_at": ledger.created_at,
            "updated_at": ledger.updated_at,
            "summary": ledger.summary,
            "items": ledger.items,
        }))?,
    }
    Ok(())
}

const STATUS_WIDTH: usize = 7;

fn render_text(ledger: &Ledger) -> String {
    let mut out = format!("{} {}\n\n", color::header("Batch"), ledger.batch_id);
    out.push_str(&summary_table(&ledger.summary));
    if ledger.items.is_empty() {
        return out;
    }
    out.push('\n');

    let width = ledger.items.iter().map(|item| item.name.len()).max().unwrap_or(0);
    for item in &ledger.items {
        // Pad outside the colour codes so columns stay aligned.
        let pad = " ".repeat(STATUS_WIDTH.saturating_sub(item.status.to_string().len()));
        let status = color::status(item.status);
        let summary = item.summary.as_deref().unwrap_or("");
        out.push_str(format!("{status}{pad} {:<width$}  {summary}", item.name).trim_end());
        out.push('\n');
    }
    out
}
