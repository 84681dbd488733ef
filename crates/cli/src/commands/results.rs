// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fanout results`: compact per-item result summaries.

use anyhow::Result;
use clap::Args;
use fanout_engine::{Broker, ResultSummary};

use crate::commands::BatchArg;
use crate::output::{print_json, OutputFormat};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct ResultsArgs {
    #[command(flatten)]
    pub batch: BatchArg,
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub fn handle(project: &Project, args: ResultsArgs) -> Result<()> {
    let paths = project.batch(&args.batch.batch)?;
    let summaries = Broker::for_batch(&paths).collect_summaries();

    match args.output {
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Text if summaries.is_empty() => println!("No results yet"),
        OutputFormat::Text => {
            for summary in &summaries {
                println!("{}", result_line(summary));
            }
        }
    }
    Ok(())
}

fn result_line(summary: &ResultSummary) -> String {
    match summary.exit_code {
        Some(code) => format!("{} (exit {code}): {}", summary.item, summary.summary),
        None => format!("{}: {}", summary.item, summary.summary),
    }
}
