// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fanout list`: batches under the project root.

use anyhow::Result;
use clap::Args;
use fanout_core::Summary;
use fanout_storage::{list_batches, LedgerHandle};
use serde::Serialize;

use crate::color;
use crate::output::{print_json, summary_line, OutputFormat};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct BatchEntry {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn handle(project: &Project, args: ListArgs) -> Result<()> {
    let batch_root = project.batch_root();
    let entries: Vec<BatchEntry> = list_batches(&batch_root)
        .into_iter()
        .map(|id| match LedgerHandle::open(&batch_root.join(&id)).summary() {
            Ok(summary) => BatchEntry { id, summary: Some(summary), error: None },
            Err(e) => BatchEntry { id, summary: None, error: Some(e.to_string()) },
        })
        .collect();

    match args.output {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Text if entries.is_empty() => println!("No batches"),
        OutputFormat::Text => {
            for entry in &entries {
                match (&entry.summary, &entry.error) {
                    (Some(summary), _) => println!(
                        "{}  {} item(s): {}",
                        entry.id,
                        summary.total,
                        summary_line(summary)
                    ),
                    (None, error) => println!(
                        "{}  {}",
                        entry.id,
                        color::muted(&format!("unreadable: {}", error.as_deref().unwrap_or("?")))
                    ),
                }
            }
        }
    }
    Ok(())
}
