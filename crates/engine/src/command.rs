// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker command construction.

use crate::error::EngineError;
use fanout_core::BatchConfig;
use std::fmt;

/// A fully-substituted worker invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Build the command that processes `item`.
///
/// The configured worker's leading arguments come first, then the prompt
/// with the item substituted, then the output format, allowed tools (only
/// when any are configured) and turn budget.
pub fn build_command(item: &str, config: &BatchConfig) -> Result<WorkerCommand, EngineError> {
    let (program, leading) = config.worker.split_first().ok_or(EngineError::EmptyWorker)?;

    let mut args = leading.to_vec();
    args.push(config.prompt_for(item));
    args.extend(["--output-format".to_string(), "json".to_string()]);
    if !config.allowed_tools.is_empty() {
        args.push("--allowedTools".to_string());
        args.push(config.allowed_tools.join(","));
    }
    args.push("--max-turns".to_string());
    args.push(config.max_turns.to_string());

    Ok(WorkerCommand { program: program.clone(), args })
}

impl WorkerCommand {
    pub fn to_tokio(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for WorkerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_worker_command() {
        let config = BatchConfig::builder("Review $item for bugs").max_turns(7);
        let cmd = build_command("src/a.py", &config).unwrap();
        assert_eq!(cmd.program, "claude");
        assert_eq!(
            cmd.args,
            strings(&["-p", "Review src/a.py for bugs", "--output-format", "json", "--max-turns", "7"])
        );
    }

    #[test]
    fn allowed_tools_are_joined() {
        let config = BatchConfig::builder("$item")
            .allowed_tools(strings(&["Read", "Grep"]))
            .worker(strings(&["agent"]));
        let cmd = build_command("x", &config).unwrap();
        assert_eq!(
            cmd.args,
            strings(&["x", "--output-format", "json", "--allowedTools", "Read,Grep", "--max-turns", "20"])
        );
    }

    #[test]
    fn every_placeholder_is_substituted() {
        let config = BatchConfig::builder("$item and $item again");
        let cmd = build_command("f", &config).unwrap();
        assert_eq!(cmd.args[1], "f and f again");
    }

    #[test]
    fn empty_worker_is_rejected() {
        let config = BatchConfig::builder("$item").worker(Vec::new());
        assert!(matches!(build_command("x", &config), Err(EngineError::EmptyWorker)));
    }

    #[test]
    fn display_quotes_spaced_args() {
        let config = BatchConfig::builder("check $item").worker(strings(&["sh", "-c"]));
        let cmd = build_command("a.py", &config).unwrap();
        assert_eq!(
            cmd.to_string(),
            "sh -c \"check a.py\" --output-format json --max-turns 20"
        );
    }
}
