// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project root resolution and `.fanout/config.toml` defaults.

use crate::exit_error::ExitError;
use anyhow::{Context, Result};
use fanout_core::BatchConfig;
use fanout_engine::DEFAULT_POLL_INTERVAL;
use fanout_storage::paths::STATE_DIR;
use fanout_storage::{batch_root, BatchPaths, LedgerHandle};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.toml";

/// Project-wide defaults. Every key is optional; CLI flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub parallel: Option<usize>,
    pub max_turns: Option<u32>,
    pub allowed_tools: Option<Vec<String>>,
    pub worker: Option<Vec<String>>,
    pub poll_interval_ms: Option<u64>,
}

impl ProjectConfig {
    /// Read `<root>/.fanout/config.toml`; a missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(STATE_DIR).join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply these defaults to a fresh batch config.
    pub fn apply(&self, mut config: BatchConfig) -> BatchConfig {
        if let Some(parallel) = self.parallel {
            config = config.parallel(parallel);
        }
        if let Some(max_turns) = self.max_turns {
            config = config.max_turns(max_turns);
        }
        if let Some(tools) = &self.allowed_tools {
            config = config.allowed_tools(tools.clone());
        }
        if let Some(worker) = &self.worker {
            config = config.worker(worker.clone());
        }
        config
    }
}

/// The directory batches are created under and workers run in.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// `explicit` root, else `FANOUT_ROOT`, else the nearest ancestor of the
    /// current directory with a `.fanout/` directory, else the current directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let root = match explicit.or_else(crate::env::root_override) {
            Some(root) => root,
            None => {
                let cwd = std::env::current_dir().context("resolving current directory")?;
                find_root(&cwd).unwrap_or(cwd)
            }
        };
        // Stored in ledgers as the workers' directory, so never relative.
        let root = std::path::absolute(&root).context("resolving project root")?;
        let config = ProjectConfig::load(&root)?;
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn batch_root(&self) -> PathBuf {
        batch_root(&self.root)
    }

    /// Paths of an existing batch, or exit 1 with `batch not found: <id>`.
    pub fn batch(&self, id: &str) -> Result<BatchPaths> {
        let paths = BatchPaths::for_batch(&self.root, id);
        let exists = !id.is_empty()
            && !id.contains(['/', '\\'])
            && LedgerHandle::open(paths.dir()).exists();
        if !exists {
            return Err(ExitError::batch_not_found(id).into());
        }
        Ok(paths)
    }

    /// `FANOUT_POLL_MS`, else `poll_interval_ms`, else the engine default.
    pub fn poll_interval(&self) -> Duration {
        crate::env::poll_interval()
            .or_else(|| self.config.poll_interval_ms.map(Duration::from_millis))
            .unwrap_or(DEFAULT_POLL_INTERVAL)
    }
}

/// Nearest ancestor of `start` (inclusive) holding a `.fanout/` directory.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    start.ancestors().find(|dir| dir.join(STATE_DIR).is_dir()).map(Path::to_path_buf)
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
