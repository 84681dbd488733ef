// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod init;
pub mod list;
pub mod report;
pub mod results;
pub mod run;
pub mod status;

use clap::Args;

/// Selects an existing batch.
#[derive(Args, Debug, Clone)]
pub struct BatchArg {
    /// Batch id (see `fanout list`)
    #[arg(short = 'b', long = "batch")]
    pub batch: String,
}
