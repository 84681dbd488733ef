//! Project root resolution and config defaults.

use crate::prelude::*;

#[test]
fn nested_directory_finds_project_root() {
    let temp = Project::empty();
    temp.file("src/a.py", "");
    let id = temp.init_shell_batch("src/*.py", "true");

    let nested = temp.path().join("src");
    let mut cmd = assert_cmd::Command::cargo_bin("fanout").unwrap();
    let output = cmd
        .args(["status", "-b", &id])
        .current_dir(&nested)
        .env_remove("FANOUT_ROOT")
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("src/a.py"));
}

#[test]
fn fanout_root_env_selects_project() {
    let temp = Project::empty();
    temp.file("src/a.py", "");
    let id = temp.init_shell_batch("src/*.py", "true");

    let elsewhere = Project::empty();
    elsewhere
        .fanout()
        .env("FANOUT_ROOT", &temp.path().to_string_lossy())
        .args(&["status", "-b", &id])
        .passes()
        .stdout_has("src/a.py");
}

#[test]
fn config_file_sets_batch_defaults() {
    let temp = Project::empty();
    temp.file(".fanout/config.toml", "parallel = 7\nmax_turns = 4\nworker = [\"sh\", \"-c\"]\n");
    temp.file("a.txt", "");

    let out = temp.fanout().args(&["init", "--pattern", "*.txt", "--prompt", "true"]).passes();
    let ledger = temp.ledger(out.stdout().trim());

    assert_eq!(ledger["config"]["parallel"], 7);
    assert_eq!(ledger["config"]["max_turns"], 4);
    assert_eq!(ledger["config"]["worker"], serde_json::json!(["sh", "-c"]));
}

#[test]
fn invalid_config_file_fails() {
    let temp = Project::empty();
    temp.file(".fanout/config.toml", "parallel = \"many\"\n");
    temp.fanout().args(&["list"]).exits_with(1).stderr_has("config.toml");
}

#[test]
fn relative_root_flag_discovers_items() {
    let temp = Project::empty();
    temp.file("src/a.py", "");
    temp.file("src/b.py", "");

    let out = temp
        .fanout()
        .args(&["--root", ".", "init", "--pattern", "src/*.py", "--prompt", "x"])
        .passes();
    let ledger = temp.ledger(out.stdout().trim());
    assert_eq!(ledger["summary"]["total"], 2);
    assert_eq!(ledger["items"][0]["name"], "src/a.py");
}
