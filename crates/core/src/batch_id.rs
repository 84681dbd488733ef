// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp-derived batch identifiers.

use chrono::{DateTime, Utc};

pub const BATCH_ID_PREFIX: &str = "batch-";

/// Batch id for a creation time, e.g. `batch-20260305-141502`.
pub fn generate_batch_id(now: DateTime<Utc>) -> String {
    format!("{BATCH_ID_PREFIX}{}", now.format("%Y%m%d-%H%M%S"))
}

/// First candidate id for `now` that `taken` rejects, suffixing `-2`, `-3`, ...
pub fn first_free_batch_id(now: DateTime<Utc>, mut taken: impl FnMut(&str) -> bool) -> String {
    let base = generate_batch_id(now);
    if !taken(&base) {
        return base;
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
