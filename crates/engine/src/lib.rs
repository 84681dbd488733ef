// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fanout-engine: result broker, item discovery, and the batch run loop

pub mod broker;
mod command;
mod discover;
mod error;
mod orchestrator;
mod process;
mod report;

pub use broker::{Broker, ResultSummary, SUMMARY_MAX_CHARS};
pub use command::{build_command, WorkerCommand};
pub use discover::discover_items;
pub use error::EngineError;
pub use orchestrator::{
    resume_batch, run_batch, Completion, RunOptions, DEFAULT_POLL_INTERVAL, NO_EXIT_CODE,
};
pub use process::is_process_alive;
pub use report::{generate_report, render_report};
