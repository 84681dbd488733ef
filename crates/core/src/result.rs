// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker result payloads.
//!
//! Workers own their output schema. A result is decoded as a handful of
//! known fields plus an open map of everything else; missing or wrong-typed
//! known fields degrade to `None` instead of failing the whole record.

use serde_json::{Map, Value};

pub const RESULT_SCHEMA_VERSION: &str = "1.0";

/// Keys searched, in order, for a one-line summary.
pub const SUMMARY_KEYS: [&str; 3] = ["summary", "result", "content"];

/// Worker-defined fields handed to the broker for writing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultData {
    pub exit_code: Option<i32>,
    pub summary: Option<String>,
    pub fields: Map<String, Value>,
}

impl ResultData {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        set {
            fields: Map<String, Value>,
        }
        option {
            exit_code: i32,
            summary: String,
        }
    }

    /// Add one worker-defined field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// A decoded result file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    pub schema_version: Option<String>,
    pub item: Option<String>,
    pub written_at: Option<String>,
    pub exit_code: Option<i32>,
    pub summary: Option<String>,
    pub completed_at: Option<String>,
    /// Every other top-level field
    pub extra: Map<String, Value>,
}

impl ResultRecord {
    /// Decode any JSON value. Non-objects become an empty record whose only
    /// content is the raw value under `extra["value"]`.
    pub fn from_value(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                let mut extra = Map::new();
                extra.insert("value".to_string(), other);
                return Self { extra, ..Self::default() };
            }
        };

        let exit_code = take_i32(&mut map, &["exit_code", "exitCode"]);
        Self {
            schema_version: take_string(&mut map, &["schema_version", "schemaVersion"]),
            item: take_string(&mut map, &["item"]),
            written_at: take_string(&mut map, &["written_at", "writtenAt"]),
            exit_code,
            summary: take_string(&mut map, &["summary"]),
            completed_at: take_string(&mut map, &["completed_at", "completedAt"]),
            extra: map,
        }
    }

    /// First summary-like field: `summary`, then `result`, then `content`.
    ///
    /// Non-string values are rendered as compact JSON.
    pub fn summary_text(&self) -> Option<String> {
        if let Some(summary) = &self.summary {
            return Some(summary.clone());
        }
        SUMMARY_KEYS[1..].iter().find_map(|key| match self.extra.get(*key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        })
    }
}

fn take_string(map: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    // Wrong-typed values stay in `extra` for inspection.
    for key in keys {
        if matches!(map.get(*key), Some(Value::String(_))) {
            if let Some(Value::String(s)) = map.remove(*key) {
                return Some(s);
            }
        }
    }
    None
}

fn take_i32(map: &mut Map<String, Value>, keys: &[&str]) -> Option<i32> {
    for key in keys {
        let parsed = map.get(*key).and_then(Value::as_i64).and_then(|n| i32::try_from(n).ok());
        if parsed.is_some() {
            map.remove(*key);
            return parsed;
        }
    }
    None
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
