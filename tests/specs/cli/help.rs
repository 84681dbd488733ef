//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("init")
        .stdout_has("run")
        .stdout_has("status")
        .stdout_has("report")
        .stdout_has("results")
        .stdout_has("list");
}

#[test]
fn run_help_shows_flags() {
    cli().args(&["run", "--help"]).passes().stdout_has("--resume").stdout_has("--batch");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_command_is_a_usage_error() {
    cli().args(&["frobnicate"]).exits_with(2);
}
