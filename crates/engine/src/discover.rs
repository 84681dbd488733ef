// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Item discovery by glob expansion.

use crate::error::EngineError;
use glob::MatchOptions;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expand `pattern` under `base_dir` into item names.
///
/// Names are file paths relative to `base_dir` joined with `/`, sorted and
/// deduplicated so repeated discovery over an unchanged tree is stable.
/// Directories are skipped, as are hidden entries unless a pattern component
/// starting with `.` matches them. Unreadable entries are dropped.
pub fn discover_items(pattern: &str, base_dir: &Path) -> Result<Vec<String>, EngineError> {
    // glob drops a leading `./` from its results, so strip against an absolute base.
    let base = std::path::absolute(base_dir).map_err(|e| EngineError::io(base_dir, e))?;
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let escaped = glob::Pattern::escape(&base.to_string_lossy());
        format!("{}/{pattern}", escaped.trim_end_matches('/'))
    };

    let paths = glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|e| EngineError::Pattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;
    let dot_patterns = hidden_patterns(pattern);

    let mut items: Vec<String> = paths
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = match path.strip_prefix(&base) {
                Ok(relative) => relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/"),
                Err(_) => path.to_string_lossy().into_owned(),
            };
            let hidden_allowed = name
                .split('/')
                .filter(|part| part.starts_with('.'))
                .all(|part| dot_patterns.iter().any(|p| p.matches_with(part, MATCH_OPTIONS)));
            hidden_allowed.then_some(name)
        })
        .filter(|name| !name.is_empty())
        .collect();

    items.sort();
    items.dedup();
    tracing::debug!(pattern, base = %base.display(), count = items.len(), "discovered items");
    Ok(items)
}

/// Pattern components that name a leading dot; only these may match hidden entries.
fn hidden_patterns(pattern: &str) -> Vec<glob::Pattern> {
    pattern
        .split('/')
        .filter(|part| part.starts_with('.') && *part != "." && *part != "..")
        .filter_map(|part| glob::Pattern::new(part).ok())
        .collect()
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
