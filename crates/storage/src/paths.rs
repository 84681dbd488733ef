// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk layout of a project's batches.
//!
//! ```text
//! <root>/.fanout/
//!   config.toml
//!   batch/<batch-id>/
//!     ledger.json
//!     report.md
//!     results/<derived-name>.json
//! ```

use chrono::{DateTime, Utc};
use fanout_core::name::RESULTS_DIR;
use std::path::{Path, PathBuf};

pub const STATE_DIR: &str = ".fanout";
pub const LEDGER_FILE: &str = "ledger.json";
pub const REPORT_FILE: &str = "report.md";

/// Directory holding every batch of a project.
pub fn batch_root(project_root: &Path) -> PathBuf {
    project_root.join(STATE_DIR).join("batch")
}

/// Paths within one batch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPaths {
    dir: PathBuf,
}

impl BatchPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Batch `id` under a project root.
    pub fn for_batch(project_root: &Path, id: &str) -> Self {
        Self::new(batch_root(project_root).join(id))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ledger(&self) -> PathBuf {
        self.dir.join(LEDGER_FILE)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.dir.join(RESULTS_DIR)
    }

    pub fn report(&self) -> PathBuf {
        self.dir.join(REPORT_FILE)
    }
}

/// Pick a batch id for `now` that is not yet used under `batch_root`.
pub fn unique_batch_id(batch_root: &Path, now: DateTime<Utc>) -> String {
    fanout_core::first_free_batch_id(now, |candidate| batch_root.join(candidate).exists())
}

/// Batch ids under `batch_root` that have a ledger, sorted.
pub fn list_batches(batch_root: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(batch_root) else {
        return Vec::new();
    };
    let mut ids: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().join(LEDGER_FILE).is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    ids.sort();
    ids
}
