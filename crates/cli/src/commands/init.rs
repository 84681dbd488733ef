// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fanout init`: discover items and create a batch ledger.

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use fanout_core::BatchConfig;
use fanout_engine::discover_items;
use fanout_storage::{unique_batch_id, LedgerHandle};

use crate::exit_error::ExitError;
use crate::project::Project;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Glob selecting the items, relative to the project root (e.g. "src/**/*.py")
    #[arg(long)]
    pub pattern: String,
    /// Prompt template; `$item` is replaced with each item name
    #[arg(long)]
    pub prompt: String,
    /// Maximum workers running at once
    #[arg(short = 'n', long)]
    pub parallel: Option<usize>,
    /// Turn budget handed to each worker
    #[arg(long)]
    pub max_turns: Option<u32>,
    /// Tools pre-approved for every worker, comma separated
    #[arg(long, value_delimiter = ',')]
    pub allowed_tools: Option<Vec<String>>,
    /// Worker program and leading arguments (default: "claude -p")
    #[arg(long)]
    pub worker: Option<String>,
}

impl InitArgs {
    /// Project defaults overlaid with the flags given.
    pub fn batch_config(&self, project: &Project) -> Result<BatchConfig> {
        let mut config = project
            .config()
            .apply(BatchConfig::builder(&self.prompt))
            .pattern(&self.pattern)
            .root(project.root());
        if let Some(parallel) = self.parallel {
            config = config.parallel(parallel);
        }
        if let Some(max_turns) = self.max_turns {
            config = config.max_turns(max_turns);
        }
        if let Some(tools) = &self.allowed_tools {
            config = config.allowed_tools(tools.iter().map(|t| t.trim().to_string()).collect());
        }
        if let Some(worker) = &self.worker {
            let words: Vec<String> = worker.split_whitespace().map(str::to_string).collect();
            if words.is_empty() {
                return Err(ExitError::new(2, "--worker must name a program").into());
            }
            config = config.worker(words);
        }
        if config.parallel == 0 {
            return Err(ExitError::new(2, "--parallel must be at least 1").into());
        }
        Ok(config)
    }
}

pub fn handle(project: &Project, args: InitArgs) -> Result<()> {
    let config = args.batch_config(project)?;
    let items = discover_items(&args.pattern, project.root())?;
    if items.is_empty() {
        return Err(ExitError::new(1, format!("no items match pattern: {}", args.pattern)).into());
    }

    let batch_root = project.batch_root();
    let id = unique_batch_id(&batch_root, Utc::now());
    LedgerHandle::create(&batch_root.join(&id), &id, &items, config)?;
    eprintln!("Created batch with {} item(s)", items.len());
    println!("{id}");
    Ok(())
}
