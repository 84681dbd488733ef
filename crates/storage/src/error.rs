// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt ledger {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unsupported ledger schema version {found} (expected {expected}.x)")]
    UnsupportedSchema { found: String, expected: &'static str },
    #[error("batch already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },
    #[error("duplicate item '{0}'")]
    DuplicateItem(String),
    #[error("items '{first}' and '{second}' both map to result name '{derived}'")]
    NameCollision { first: String, second: String, derived: String },
    #[error("item name '{0}' has no usable result name")]
    InvalidItemName(String),
    #[error("item '{0}' cannot become active without a worker pid")]
    MissingPid(String),
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io { path: path.into(), source }
    }
}
