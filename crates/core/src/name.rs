// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-safe result names derived from item names.
//!
//! `src/auth/service.py` becomes `src_auth_service_py`. Derivation is
//! deterministic and idempotent, and the output never contains a path
//! separator.

use std::collections::HashMap;

/// Character substituted for path separators and dots.
pub const SUBSTITUTE: char = '_';

/// Extension of result files written under `results/`.
pub const RESULT_EXT: &str = "json";

/// Directory (relative to the batch directory) holding result files.
pub const RESULTS_DIR: &str = "results";

/// Derive the file stem used for an item's result file.
pub fn derive_result_name(item: &str) -> String {
    let replaced: String = item
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '.') { SUBSTITUTE } else { c })
        .collect();
    replaced.trim_end_matches(SUBSTITUTE).to_string()
}

/// Batch-relative result file path for an item, e.g. `results/src_a_py.json`.
pub fn result_file_for(item: &str) -> String {
    format!("{RESULTS_DIR}/{}.{RESULT_EXT}", derive_result_name(item))
}

/// Two distinct item names that derive to the same result name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub first: String,
    pub second: String,
    pub derived: String,
}

/// Find the first pair of distinct items whose derived names collide.
///
/// Identical names are not reported here; duplicates are a separate error.
pub fn find_collision<S: AsRef<str>>(items: &[S]) -> Option<NameCollision> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(items.len());
    for item in items {
        let item = item.as_ref();
        let derived = derive_result_name(item);
        match seen.get(&derived) {
            Some(&first) if first != item => {
                return Some(NameCollision {
                    first: first.to_string(),
                    second: item.to_string(),
                    derived,
                });
            }
            Some(_) => {}
            None => {
                seen.insert(derived, item);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
