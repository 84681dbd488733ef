// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use fanout_storage::LedgerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a batch from making forward progress.
///
/// Per-item problems (non-zero exits, workers that fail to launch, corrupt
/// result files) are recorded in the ledger instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    #[error("max parallel must be at least 1")]
    InvalidParallelism,
    #[error("worker command is empty")]
    EmptyWorker,
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io { path: path.into(), source }
    }
}
