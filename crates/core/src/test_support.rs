// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{BatchConfig, Item, ItemStatus};
use chrono::{DateTime, TimeZone, Utc};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for item state.
pub mod strategies {
    use crate::item::ItemStatus;
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = ItemStatus> {
        prop_oneof![
            Just(ItemStatus::Pending),
            Just(ItemStatus::Active),
            Just(ItemStatus::Done),
            Just(ItemStatus::Failed),
        ]
    }

    /// Path-like item names such as `src/mod_3/file.py`.
    pub fn arb_item_name() -> impl Strategy<Value = String> {
        "[a-z]{1,6}(/[a-z0-9_]{1,6}){0,3}(\\.[a-z]{1,3})?"
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

/// Fixed instant used by fixtures.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_772_720_102, 0).single().unwrap_or_default()
}

/// An item already moved into `status`, with a pid when active.
pub fn item_in(name: &str, status: ItemStatus, pid: Option<u32>) -> Item {
    let mut item = Item::pending(name);
    item.transition(status, fixed_time());
    if status == ItemStatus::Active {
        item.pid = pid.or(Some(1));
    }
    item
}

/// Config whose worker is `sh -c <prompt>`, so the prompt is a shell script.
pub fn shell_config(script: &str) -> BatchConfig {
    BatchConfig::builder(script).worker(vec!["sh".to_string(), "-c".to_string()]).parallel(2)
}
