// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Project root override (`FANOUT_ROOT`)
pub fn root_override() -> Option<PathBuf> {
    std::env::var("FANOUT_ROOT").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Poll interval override (`FANOUT_POLL_MS`)
pub fn poll_interval() -> Option<Duration> {
    std::env::var("FANOUT_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Log filter directive (`FANOUT_LOG`, default `warn`)
pub fn log_filter() -> String {
    std::env::var("FANOUT_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// `NO_COLOR=1` disables colour output.
pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

/// `COLOR=1` forces colour output.
pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
