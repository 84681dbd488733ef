// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch configuration recorded in the ledger.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder substituted with the item name in the prompt template.
pub const ITEM_PLACEHOLDER: &str = "$item";

pub const DEFAULT_PARALLEL: usize = 5;
pub const DEFAULT_MAX_TURNS: u32 = 20;

/// Worker program and leading arguments used when no other is configured.
pub fn default_worker() -> Vec<String> {
    vec!["claude".to_string(), "-p".to_string()]
}

fn default_parallel() -> usize {
    DEFAULT_PARALLEL
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

/// Configuration for one batch: what to run for each item and how wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Prompt template containing [`ITEM_PLACEHOLDER`]
    pub prompt_template: String,
    /// Glob pattern the items were discovered with
    #[serde(default)]
    pub pattern: String,
    /// Maximum number of concurrently running workers
    #[serde(default = "default_parallel")]
    pub parallel: usize,
    /// Per-item turn budget, enforced by the worker itself
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Capabilities pre-approved for every worker
    #[serde(default)]
    pub allowed_tools: Vec<String>,
    /// Worker program followed by its leading arguments
    #[serde(default = "default_worker")]
    pub worker: Vec<String>,
    /// Directory discovery ran against; workers run here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl BatchConfig {
    pub fn builder(prompt_template: impl Into<String>) -> Self {
        Self {
            prompt_template: prompt_template.into(),
            pattern: String::new(),
            parallel: DEFAULT_PARALLEL,
            max_turns: DEFAULT_MAX_TURNS,
            allowed_tools: Vec::new(),
            worker: default_worker(),
            root: None,
        }
    }

    crate::setters! {
        into {
            pattern: String,
        }
        set {
            parallel: usize,
            max_turns: u32,
            allowed_tools: Vec<String>,
            worker: Vec<String>,
        }
        option {
            root: PathBuf,
        }
    }

    /// Substitute the item name into the prompt template.
    pub fn prompt_for(&self, item: &str) -> String {
        self.prompt_template.replace(ITEM_PLACEHOLDER, item)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
