// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result broker: keeps full worker output on disk and hands out compact views.
//!
//! A supervising process only ever holds one result file in memory at a time;
//! everything it keeps is a [`ResultSummary`] capped at [`SUMMARY_MAX_CHARS`].

use crate::error::EngineError;
use chrono::Utc;
use fanout_core::name::{derive_result_name, RESULT_EXT};
use fanout_core::result::{ResultData, ResultRecord, RESULT_SCHEMA_VERSION};
use fanout_storage::{write_atomic, BatchPaths};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Longest summary kept for an item.
pub const SUMMARY_MAX_CHARS: usize = 200;

pub const NO_SUMMARY: &str = "No summary";
pub const NO_OUTPUT: &str = "No output";
pub const NO_SUMMARY_AVAILABLE: &str = "No summary available";
pub const UNREADABLE_RESULT: &str = "Error reading result file";

/// The four fields a supervisor may hold per result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub item: String,
    pub summary: String,
    pub exit_code: Option<i32>,
    pub completed_at: Option<String>,
}

/// Reads and writes the result files of one batch.
#[derive(Debug, Clone)]
pub struct Broker {
    results_dir: PathBuf,
}

impl Broker {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self { results_dir: results_dir.into() }
    }

    pub fn for_batch(paths: &BatchPaths) -> Self {
        Self::new(paths.results_dir())
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Where `item`'s result lives: `<results>/<derived>.json`.
    pub fn result_path(&self, item: &str) -> PathBuf {
        self.results_dir.join(format!("{}.{RESULT_EXT}", derive_result_name(item)))
    }

    /// Write `data` for `item`, stamped with schema version, item name and
    /// write time. Creates the results directory if needed.
    pub fn write_result(&self, item: &str, data: ResultData) -> Result<PathBuf, EngineError> {
        std::fs::create_dir_all(&self.results_dir)
            .map_err(|e| EngineError::io(&self.results_dir, e))?;

        let mut map: Map<String, Value> = data.fields;
        if let Some(code) = data.exit_code {
            map.insert("exit_code".into(), code.into());
        }
        if let Some(summary) = data.summary {
            map.insert("summary".into(), summary.into());
        }
        map.insert("schema_version".into(), RESULT_SCHEMA_VERSION.into());
        map.insert("item".into(), item.into());
        map.insert("written_at".into(), Utc::now().to_rfc3339().into());

        let path = self.result_path(item);
        let json = serde_json::to_vec_pretty(&Value::Object(map))
            .map_err(|e| EngineError::io(&path, std::io::Error::other(e)))?;
        write_atomic(&path, &json).map_err(|e| EngineError::io(&path, e))?;
        Ok(path)
    }

    /// Read `item`'s result. Missing and unparsable files both yield `None`.
    pub fn read_result(&self, item: &str) -> Option<ResultRecord> {
        read_record(&self.result_path(item)).ok()
    }

    /// Compact summaries of every result file, ordered by file name.
    ///
    /// An unreadable file yields a placeholder entry rather than ending the scan.
    pub fn collect_summaries(&self) -> Vec<ResultSummary> {
        let Ok(entries) = std::fs::read_dir(&self.results_dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_result_file(path))
            .collect();
        files.sort();

        files
            .iter()
            .map(|path| {
                let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
                match read_record(path) {
                    Ok(record) => ResultSummary {
                        summary: record
                            .summary_text()
                            .map(|s| one_line(&s))
                            .unwrap_or_else(|| NO_SUMMARY.to_string()),
                        item: record.item.unwrap_or(stem),
                        exit_code: record.exit_code,
                        completed_at: record.completed_at,
                    },
                    Err(reason) => {
                        tracing::warn!(path = %path.display(), error = %reason, "unreadable result file");
                        ResultSummary {
                            item: stem,
                            summary: UNREADABLE_RESULT.to_string(),
                            exit_code: None,
                            completed_at: None,
                        }
                    }
                }
            })
            .collect()
    }

    /// One-line summary of a worker's output file.
    ///
    /// Prefers a structured `summary`/`result`/`content` field, else the first
    /// non-empty line, truncated to [`SUMMARY_MAX_CHARS`].
    pub fn summarize_output(path: &Path) -> String {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return NO_OUTPUT.to_string(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read worker output");
                return NO_SUMMARY_AVAILABLE.to_string();
            }
        };

        let structured = serde_json::from_str::<Value>(&text)
            .ok()
            .filter(Value::is_object)
            .and_then(|value| ResultRecord::from_value(value).summary_text())
            .filter(|s| !s.trim().is_empty());
        match structured {
            Some(summary) => one_line(&summary),
            None if text.trim().is_empty() => NO_SUMMARY_AVAILABLE.to_string(),
            None => one_line(&text),
        }
    }
}

fn read_record(path: &Path) -> Result<ResultRecord, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    Ok(ResultRecord::from_value(value))
}

fn is_result_file(path: &Path) -> bool {
    let hidden = path.file_name().is_some_and(|n| n.to_string_lossy().starts_with('.'));
    !hidden && path.is_file() && path.extension().is_some_and(|ext| ext == RESULT_EXT)
}

/// First non-empty line, trimmed and capped at [`SUMMARY_MAX_CHARS`] characters.
pub fn one_line(text: &str) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or_default();
    line.chars().take(SUMMARY_MAX_CHARS).collect()
}

#[cfg(test)]
#[path = "broker_tests.rs"]
mod tests;
