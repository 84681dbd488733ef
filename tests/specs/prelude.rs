//! Shared harness for black-box specs of the `fanout` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Poll interval used by every spec run, in milliseconds.
const SPEC_POLL_MS: &str = "10";

/// `fanout` with no project directory.
pub fn cli() -> CliBuilder {
    CliBuilder::new(None)
}

/// A throwaway project directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` at `rel`, creating parent directories.
    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    pub fn batch_dir(&self, id: &str) -> PathBuf {
        self.dir.path().join(".fanout/batch").join(id)
    }

    pub fn ledger(&self, id: &str) -> serde_json::Value {
        let text = std::fs::read_to_string(self.batch_dir(id).join("ledger.json")).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    /// `fanout` running inside this project.
    pub fn fanout(&self) -> CliBuilder {
        CliBuilder::new(Some(self.dir.path()))
    }

    /// `fanout init` with a `sh -c` worker; returns the new batch id.
    pub fn init_shell_batch(&self, pattern: &str, script: &str) -> String {
        let out = self
            .fanout()
            .args(&["init", "--pattern", pattern, "--prompt", script, "--worker", "sh -c"])
            .passes();
        out.stdout().trim().to_string()
    }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    fn new(cwd: Option<&Path>) -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin("fanout").unwrap();
        cmd.env_remove("FANOUT_ROOT")
            .env_remove("FANOUT_LOG")
            .env_remove("COLOR")
            .env("NO_COLOR", "1")
            .env("FANOUT_POLL_MS", SPEC_POLL_MS);
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn output(mut self) -> CliOutput {
        let output = self.cmd.output().unwrap();
        CliOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> CliOutput {
        let out = self.output();
        assert_eq!(out.code, Some(0), "expected success\nstdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }

    /// Run and require the given non-zero exit code.
    pub fn exits_with(self, code: i32) -> CliOutput {
        let out = self.output();
        assert_eq!(out.code, Some(code), "stdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }
}

pub struct CliOutput {
    pub code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl CliOutput {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }
}
