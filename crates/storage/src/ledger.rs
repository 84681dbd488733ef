// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The batch ledger: durable record of every item's state.
//!
//! The file on disk is the only source of truth. Every mutation reloads the
//! document, applies the change, recomputes the summary, and commits through
//! [`write_atomic`]. Nothing is cached between calls, so a coordinator can
//! crash at any point and a later one picks up the last committed state.
//!
//! Concurrent coordinators against one batch directory are not supported:
//! the rename prevents torn documents but not lost updates.

use crate::atomic::write_atomic;
use crate::error::LedgerError;
use crate::paths::{BatchPaths, LEDGER_FILE};
use chrono::{DateTime, Utc};
use fanout_core::{derive_result_name, find_collision, BatchConfig, Item, ItemStatus, Summary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Current ledger schema version
pub const LEDGER_SCHEMA_VERSION: &str = "1.0";

const SCHEMA_MAJOR: &str = "1";

/// The persisted batch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub schema_version: String,
    pub batch_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub config: BatchConfig,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Ledger {
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.name == name)
    }

    /// Names of items eligible to run, in ledger order.
    pub fn resumable_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.status.is_resumable())
            .map(|item| item.name.clone())
            .collect()
    }

    pub fn items_with(&self, status: ItemStatus) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.status == status)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.summary = Summary::from_items(&self.items);
        self.updated_at = now;
    }
}

/// Optional fields applied alongside a status change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub summary: Option<String>,
    pub pid: Option<u32>,
    pub exit_code: Option<i32>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    fanout_core::setters! {
        option {
            summary: String,
            pid: u32,
            exit_code: i32,
        }
    }
}

/// Handle to a ledger file. Cheap to clone; performs no I/O until used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerHandle {
    path: PathBuf,
}

impl LedgerHandle {
    /// Handle for the ledger inside `batch_dir`.
    pub fn open(batch_dir: &Path) -> Self {
        Self { path: batch_dir.join(LEDGER_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create a new ledger with every item `pending`.
    ///
    /// Creates `batch_dir` and its `results/` directory. Item names must be
    /// unique and must not collide after result-name derivation.
    pub fn create(
        batch_dir: &Path,
        batch_id: &str,
        items: &[String],
        config: BatchConfig,
    ) -> Result<Self, LedgerError> {
        validate_items(items)?;

        let paths = BatchPaths::new(batch_dir);
        let handle = Self::open(batch_dir);
        if handle.exists() {
            return Err(LedgerError::AlreadyExists { path: handle.path.clone() });
        }
        std::fs::create_dir_all(paths.results_dir())
            .map_err(|e| LedgerError::io(paths.results_dir(), e))?;

        let now = Utc::now();
        let items: Vec<Item> = items.iter().map(Item::pending).collect();
        let ledger = Ledger {
            schema_version: LEDGER_SCHEMA_VERSION.to_string(),
            batch_id: batch_id.to_string(),
            created_at: now,
            updated_at: now,
            config,
            summary: Summary::from_items(&items),
            items,
        };
        handle.save(&ledger)?;
        tracing::info!(batch = batch_id, items = ledger.items.len(), "created ledger");
        Ok(handle)
    }

    /// Read the current document. The summary is recomputed from the items.
    pub fn load(&self) -> Result<Ledger, LedgerError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LedgerError::NotFound { path: self.path.clone() });
            }
            Err(e) => return Err(LedgerError::io(&self.path, e)),
        };
        let mut ledger: Ledger = serde_json::from_slice(&bytes)
            .map_err(|source| LedgerError::Corrupt { path: self.path.clone(), source })?;

        let major = ledger.schema_version.split('.').next().unwrap_or_default();
        if major != SCHEMA_MAJOR {
            return Err(LedgerError::UnsupportedSchema {
                found: ledger.schema_version,
                expected: SCHEMA_MAJOR,
            });
        }
        ledger.summary = Summary::from_items(&ledger.items);
        Ok(ledger)
    }

    /// Move one item to `status`, applying the timestamp and pid rules.
    ///
    /// Unknown item names are ignored (logged, no write). Moving to `active`
    /// requires `update.pid`.
    pub fn update_item_status(
        &self,
        item_name: &str,
        status: ItemStatus,
        update: ItemUpdate,
    ) -> Result<(), LedgerError> {
        if status == ItemStatus::Active && update.pid.is_none() {
            return Err(LedgerError::MissingPid(item_name.to_string()));
        }
        let mut ledger = self.load()?;
        let now = Utc::now();
        let Some(item) = ledger.item_mut(item_name) else {
            tracing::warn!(item = item_name, path = %self.path.display(), "update for unknown item ignored");
            return Ok(());
        };

        if !item.status.can_transition_to(status) {
            tracing::debug!(item = item_name, from = %item.status, to = %status, "off-graph status change");
        }
        item.transition(status, now);
        if status == ItemStatus::Active {
            item.pid = update.pid;
        }
        if status.is_terminal() {
            if let Some(code) = update.exit_code {
                item.exit_code = Some(code);
            }
        }
        if let Some(summary) = update.summary {
            item.summary = Some(summary);
        }

        ledger.touch(now);
        self.save(&ledger)?;
        tracing::debug!(item = item_name, %status, "ledger updated");
        Ok(())
    }

    /// Names of `pending` and `failed` items, in ledger order.
    pub fn resumable_items(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self.load()?.resumable_names())
    }

    /// Items currently marked `active`.
    pub fn active_items(&self) -> Result<Vec<Item>, LedgerError> {
        Ok(self.load()?.items_with(ItemStatus::Active).cloned().collect())
    }

    /// Recomputed status counts.
    pub fn summary(&self) -> Result<Summary, LedgerError> {
        Ok(self.load()?.summary)
    }

    /// Reset every `active` item whose pid is not alive back to `pending`.
    ///
    /// An active item without a pid counts as dead. Returns the reset names;
    /// writes only when something changed.
    pub fn reset_stale_active(
        &self,
        is_alive: impl Fn(u32) -> bool,
    ) -> Result<Vec<String>, LedgerError> {
        let mut ledger = self.load()?;
        let now = Utc::now();
        let mut reset = Vec::new();

        for item in ledger.items.iter_mut().filter(|item| item.status == ItemStatus::Active) {
            let alive = item.pid.is_some_and(&is_alive);
            if alive {
                continue;
            }
            tracing::warn!(item = %item.name, pid = ?item.pid, "worker process gone, resetting to pending");
            item.transition(ItemStatus::Pending, now);
            reset.push(item.name.clone());
        }

        if !reset.is_empty() {
            ledger.touch(now);
            self.save(&ledger)?;
        }
        Ok(reset)
    }

    fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        let json = serde_json::to_vec_pretty(ledger)?;
        write_atomic(&self.path, &json).map_err(|e| LedgerError::io(&self.path, e))
    }
}

fn validate_items(items: &[String]) -> Result<(), LedgerError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if derive_result_name(item).is_empty() {
            return Err(LedgerError::InvalidItemName(item.clone()));
        }
        if !seen.insert(item.as_str()) {
            return Err(LedgerError::DuplicateItem(item.clone()));
        }
    }
    if let Some(collision) = find_collision(items) {
        return Err(LedgerError::NameCollision {
            first: collision.first,
            second: collision.second,
            derived: collision.derived,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
