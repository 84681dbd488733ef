// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fanout run`: drive a batch to completion.

use anyhow::Result;
use clap::Args;
use fanout_core::ItemStatus;
use fanout_engine::{resume_batch, run_batch, Completion, RunOptions};

use crate::color;
use crate::commands::BatchArg;
use crate::output::summary_line;
use crate::project::Project;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub batch: BatchArg,
    /// Override the batch's max parallelism
    #[arg(short = 'n', long)]
    pub parallel: Option<usize>,
    /// Reset items whose worker died before running
    #[arg(long)]
    pub resume: bool,
}

pub async fn handle(project: &Project, args: RunArgs) -> Result<()> {
    let paths = project.batch(&args.batch.batch)?;
    let mut options = RunOptions::new().poll_interval(project.poll_interval());
    if let Some(parallel) = args.parallel {
        options = options.parallel(parallel);
    }

    let mut print = |completion: &Completion| println!("{}", completion_line(completion));
    let summary = if args.resume {
        resume_batch(paths.dir(), &options, Some(&mut print)).await?
    } else {
        run_batch(paths.dir(), &options, Some(&mut print)).await?
    };

    println!("{}", summary_line(&summary));
    if !summary.is_finished() {
        let hint = if args.resume {
            "their workers are still running"
        } else {
            "use --resume to recover them if their workers have exited"
        };
        eprintln!("{} item(s) still active; {hint}", summary.active);
    }
    Ok(())
}

fn completion_line(completion: &Completion) -> String {
    let status = if completion.exit_code == 0 { ItemStatus::Done } else { ItemStatus::Failed };
    format!("[{}] {}: {}", color::status(status), completion.item, completion.summary)
}
