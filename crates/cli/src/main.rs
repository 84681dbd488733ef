// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `fanout`: fan a set of work items out to parallel worker processes.

mod color;
mod commands;
mod env;
mod exit_error;
mod output;
mod project;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::{init, list, report, results, run, status, BatchArg};
use crate::exit_error::ExitError;
use crate::project::Project;

#[derive(Parser)]
#[command(name = "fanout", version, about = "Run one worker per item, in parallel, with a resumable ledger")]
#[command(styles = color::styles())]
struct Cli {
    /// Project root (default: FANOUT_ROOT, else the nearest directory with .fanout/)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover items and create a new batch
    Init(init::InitArgs),
    /// Run pending and failed items of a batch
    Run(run::RunArgs),
    /// Show batch counts and item states
    Status(status::StatusArgs),
    /// Render the batch report and save it as report.md
    Report(BatchArg),
    /// Show compact result summaries
    Results(results::ResultsArgs),
    /// List batches
    List(list::ListArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("error: {exit}");
                }
                exit.exit_code()
            }
            None => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let project = Project::resolve(cli.root)?;
    tracing::debug!(root = %project.root().display(), "resolved project");

    match cli.command {
        Command::Init(args) => init::handle(&project, args),
        Command::Run(args) => run::handle(&project, args).await,
        Command::Status(args) => status::handle(&project, args),
        Command::Report(args) => report::handle(&project, args),
        Command::Results(args) => results::handle(&project, args),
        Command::List(args) => list::handle(&project, args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
