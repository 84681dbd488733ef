// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work items, their status machine, and aggregate counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a single work item.
///
/// ```text
/// pending ──claim──▶ active ──exit 0──▶ done
///    ▲                 │  └──exit≠0──▶ failed
///    └──stale reset────┘                 │
///                      ▲────re-claim─────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,
    Active,
    Done,
    Failed,
}

impl ItemStatus {
    /// Done or failed.
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Done | ItemStatus::Failed)
    }

    /// Eligible to be claimed by a run or resume.
    pub fn is_resumable(self) -> bool {
        matches!(self, ItemStatus::Pending | ItemStatus::Failed)
    }

    /// Whether moving from `self` to `next` is an edge of the state machine.
    ///
    /// `pending → done|failed` is accepted because a worker that never
    /// launched is recorded as failed without passing through `active`.
    pub fn can_transition_to(self, next: ItemStatus) -> bool {
        use ItemStatus::*;
        matches!(
            (self, next),
            (Pending, Active)
                | (Pending, Done)
                | (Pending, Failed)
                | (Active, Done)
                | (Active, Failed)
                | (Active, Pending)
                | (Failed, Active)
        )
    }
}

crate::simple_display! {
    ItemStatus {
        Pending => "pending",
        Active => "active",
        Done => "done",
        Failed => "failed",
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "active" => Ok(ItemStatus::Active),
            "done" => Ok(ItemStatus::Done),
            "failed" => Ok(ItemStatus::Failed),
            other => Err(format!("unknown item status '{other}'")),
        }
    }
}

/// One unit of work within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Path-like name, unique within the batch
    pub name: String,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Worker process id; only set while `active`
    #[serde(default)]
    pub pid: Option<u32>,
    /// Result file path relative to the batch directory
    pub result_file: String,
    /// One-line result summary
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub exit_code: Option<i32>,
}

impl Item {
    /// A fresh `pending` item whose result lands in `results/<derived>.json`.
    pub fn pending(name: impl Into<String>) -> Self {
        let name = name.into();
        let result_file = crate::name::result_file_for(&name);
        Self {
            name,
            status: ItemStatus::Pending,
            started_at: None,
            completed_at: None,
            pid: None,
            result_file,
            summary: None,
            exit_code: None,
        }
    }

    /// Apply a status change at `now`, maintaining the timestamp and pid rules.
    pub fn transition(&mut self, next: ItemStatus, now: DateTime<Utc>) {
        self.status = next;
        match next {
            ItemStatus::Active => {
                self.started_at = Some(now);
                self.completed_at = None;
                self.exit_code = None;
            }
            ItemStatus::Done | ItemStatus::Failed => {
                self.started_at.get_or_insert(now);
                self.completed_at = Some(now);
                self.pid = None;
            }
            ItemStatus::Pending => {
                self.started_at = None;
                self.completed_at = None;
                self.pid = None;
                self.exit_code = None;
            }
        }
    }

    /// Check the per-item invariants; returns a description of the first violation.
    pub fn invariant_violation(&self) -> Option<&'static str> {
        match self.status {
            ItemStatus::Active if self.pid.is_none() => Some("active item without pid"),
            ItemStatus::Active if self.started_at.is_none() => Some("active item without started_at"),
            ItemStatus::Pending if self.started_at.is_some() => Some("pending item with started_at"),
            ItemStatus::Pending | ItemStatus::Active if self.completed_at.is_some() => {
                Some("unfinished item with completed_at")
            }
            ItemStatus::Done | ItemStatus::Failed if self.completed_at.is_none() => {
                Some("finished item without completed_at")
            }
            s if s != ItemStatus::Active && self.pid.is_some() => Some("inactive item with pid"),
            _ => None,
        }
    }
}

/// Aggregate counters over an item collection.
///
/// Always recomputed from the items; never stored as independent truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub done: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_items(items: &[Item]) -> Self {
        let mut summary = Summary { total: items.len(), ..Summary::default() };
        for item in items {
            match item.status {
                ItemStatus::Pending => summary.pending += 1,
                ItemStatus::Active => summary.active += 1,
                ItemStatus::Done => summary.done += 1,
                ItemStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }

    /// Count for a single status.
    pub fn count(&self, status: ItemStatus) -> usize {
        match status {
            ItemStatus::Pending => self.pending,
            ItemStatus::Active => self.active,
            ItemStatus::Done => self.done,
            ItemStatus::Failed => self.failed,
        }
    }

    /// Nothing left to run or waiting on a worker.
    pub fn is_finished(&self) -> bool {
        self.pending == 0 && self.active == 0
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
