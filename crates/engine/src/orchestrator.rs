// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-parallelism batch driver.
//!
//! One coordinator loop claims items in ledger order, launches one worker
//! process per item, and polls them without blocking. Every state change is
//! committed to the ledger before the loop moves on, so a crashed
//! coordinator can be replaced by [`resume_batch`].

use crate::broker::Broker;
use crate::command::build_command;
use crate::error::EngineError;
use crate::process::is_process_alive;
use fanout_core::result::ResultData;
use fanout_core::{BatchConfig, ItemStatus, Summary};
use fanout_storage::{BatchPaths, ItemUpdate, LedgerHandle};
use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Child;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Exit code recorded when a worker never ran or died without one.
pub const NO_EXIT_CODE: i32 = -1;

/// Knobs for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Overrides the batch's configured parallelism
    pub parallel: Option<usize>,
    pub poll_interval: Duration,
    /// Worker working directory; defaults to the batch root, else the batch directory
    pub cwd: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { parallel: None, poll_interval: DEFAULT_POLL_INTERVAL, cwd: None }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    fanout_core::setters! {
        set {
            poll_interval: Duration,
        }
        option {
            parallel: usize,
            cwd: PathBuf,
        }
    }
}

/// Reported to the caller as each item finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub item: String,
    pub exit_code: i32,
    pub summary: String,
}

struct Running {
    item: String,
    child: Child,
    output: PathBuf,
}

/// Run every `pending` and `failed` item of the batch in `batch_dir`.
///
/// At most `parallel` workers run at once. Returns the ledger summary once no
/// claimable items remain and every launched worker has exited. Failed items
/// are ledger state, not errors.
pub async fn run_batch(
    batch_dir: &Path,
    options: &RunOptions,
    mut on_complete: Option<&mut dyn FnMut(&Completion)>,
) -> Result<Summary, EngineError> {
    let handle = LedgerHandle::open(batch_dir);
    let ledger = handle.load()?;
    let parallel = checked_parallel(&ledger.config, options)?;

    let paths = BatchPaths::new(batch_dir);
    let broker = Broker::for_batch(&paths);
    std::fs::create_dir_all(broker.results_dir())
        .map_err(|e| EngineError::io(broker.results_dir(), e))?;
    let cwd = options
        .cwd
        .clone()
        .or_else(|| ledger.config.root.clone())
        .unwrap_or_else(|| batch_dir.to_path_buf());

    let mut queue: VecDeque<String> = ledger.resumable_names().into();
    tracing::info!(batch = %ledger.batch_id, items = queue.len(), parallel, "starting batch");

    let mut running: Vec<Running> = Vec::with_capacity(parallel);
    let mut notify = |completion: Completion| {
        if let Some(callback) = on_complete.as_mut() {
            callback(&completion);
        }
    };

    while !queue.is_empty() || !running.is_empty() {
        while running.len() < parallel {
            let Some(item) = queue.pop_front() else { break };
            let output = broker.result_path(&item);
            match launch(&item, &ledger.config, &output, &cwd) {
                Ok(child) => {
                    let pid = child.id();
                    let update = ItemUpdate { pid, ..ItemUpdate::default() };
                    handle.update_item_status(&item, ItemStatus::Active, update)?;
                    tracing::debug!(item = %item, pid = ?pid, "claimed");
                    running.push(Running { item, child, output });
                }
                Err(reason) => {
                    let summary = format!("failed to launch worker: {reason}");
                    tracing::warn!(item = %item, error = %reason, "failed to launch worker");
                    record_launch_failure(&broker, &item, &summary);
                    handle.update_item_status(
                        &item,
                        ItemStatus::Failed,
                        ItemUpdate::new().exit_code(NO_EXIT_CODE).summary(summary.clone()),
                    )?;
                    notify(Completion { item, exit_code: NO_EXIT_CODE, summary });
                }
            }
        }

        let mut finished_any = false;
        let mut index = 0;
        while index < running.len() {
            let polled = running[index].child.try_wait();
            let exit_code = match polled {
                Ok(None) => {
                    index += 1;
                    continue;
                }
                Ok(Some(status)) => exit_code_of(status),
                Err(e) => {
                    tracing::warn!(item = %running[index].item, error = %e, "cannot poll worker");
                    NO_EXIT_CODE
                }
            };
            let done = running.remove(index);
            finished_any = true;

            let summary = Broker::summarize_output(&done.output);
            let status = if exit_code == 0 { ItemStatus::Done } else { ItemStatus::Failed };
            handle.update_item_status(
                &done.item,
                status,
                ItemUpdate::new().exit_code(exit_code).summary(summary.clone()),
            )?;
            tracing::info!(item = %done.item, exit_code, %status, "item finished");
            notify(Completion { item: done.item, exit_code, summary });
        }

        if !finished_any && !running.is_empty() {
            tokio::time::sleep(options.poll_interval).await;
        }
    }

    let summary = handle.summary()?;
    tracing::info!(
        batch = %ledger.batch_id,
        done = summary.done,
        failed = summary.failed,
        pending = summary.pending,
        "batch finished"
    );
    Ok(summary)
}

/// Recover from a dead coordinator, then [`run_batch`].
///
/// Items left `active` whose worker process is gone go back to `pending` and
/// are claimed again together with the other resumable items.
pub async fn resume_batch(
    batch_dir: &Path,
    options: &RunOptions,
    on_complete: Option<&mut dyn FnMut(&Completion)>,
) -> Result<Summary, EngineError> {
    let handle = LedgerHandle::open(batch_dir);
    checked_parallel(&handle.load()?.config, options)?;
    let reset = handle.reset_stale_active(is_process_alive)?;
    if !reset.is_empty() {
        tracing::info!(count = reset.len(), "reset stale items before resuming");
    }
    run_batch(batch_dir, options, on_complete).await
}

/// Effective parallelism, rejecting runs that could never make progress.
fn checked_parallel(config: &BatchConfig, options: &RunOptions) -> Result<usize, EngineError> {
    let parallel = options.parallel.unwrap_or(config.parallel);
    if parallel == 0 {
        return Err(EngineError::InvalidParallelism);
    }
    if config.worker.is_empty() {
        return Err(EngineError::EmptyWorker);
    }
    Ok(parallel)
}

fn launch(
    item: &str,
    config: &BatchConfig,
    output: &Path,
    cwd: &Path,
) -> Result<Child, EngineError> {
    let command = build_command(item, config)?;
    let stdout = File::create(output).map_err(|e| EngineError::io(output, e))?;
    let stderr = stdout.try_clone().map_err(|e| EngineError::io(output, e))?;

    let mut cmd = command.to_tokio();
    cmd.current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .kill_on_drop(true);
    tracing::debug!(item, command = %command, "launching worker");
    cmd.spawn().map_err(|e| EngineError::io(&command.program, e))
}

fn record_launch_failure(broker: &Broker, item: &str, summary: &str) {
    let data = ResultData::new().exit_code(NO_EXIT_CODE).summary(summary);
    if let Err(e) = broker.write_result(item, data) {
        tracing::warn!(item, error = %e, "cannot write result for unlaunched worker");
    }
}

fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(NO_EXIT_CODE)
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
