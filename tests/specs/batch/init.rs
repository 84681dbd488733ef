//! `fanout init` specs.

use crate::prelude::*;

#[test]
fn init_creates_pending_ledger() {
    let temp = Project::empty();
    temp.file("src/b.py", "");
    temp.file("src/a.py", "");
    temp.file("src/readme.md", "");

    let id = temp.init_shell_batch("src/*.py", "check $item");
    assert!(id.starts_with("batch-"), "{id}");

    let ledger = temp.ledger(&id);
    assert_eq!(ledger["batch_id"], id.as_str());
    assert_eq!(
        ledger["summary"],
        serde_json::json!({"total": 2, "pending": 2, "active": 0, "done": 0, "failed": 0})
    );
    assert_eq!(ledger["items"][0]["name"], "src/a.py");
    assert_eq!(ledger["items"][0]["status"], "pending");
    assert_eq!(ledger["items"][0]["result_file"], "results/src_a_py.json");
    assert_eq!(ledger["items"][1]["name"], "src/b.py");
    assert!(temp.batch_dir(&id).join("results").is_dir());
}

#[test]
fn second_init_gets_distinct_id() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    let first = temp.init_shell_batch("*.txt", "true");
    let second = temp.init_shell_batch("*.txt", "true");
    assert_ne!(first, second);
}

#[test]
fn init_without_matches_fails() {
    let temp = Project::empty();
    temp.fanout()
        .args(&["init", "--pattern", "src/*.py", "--prompt", "x"])
        .exits_with(1)
        .stderr_has("no items match pattern: src/*.py");
}

#[test]
fn init_rejects_colliding_names() {
    let temp = Project::empty();
    temp.file("a/b.py", "");
    temp.file("a_b.py", "");
    temp.fanout()
        .args(&["init", "--pattern", "**/*.py", "--prompt", "x"])
        .exits_with(1)
        .stderr_has("a_b_py");
}

#[test]
fn init_rejects_zero_parallelism() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    temp.fanout()
        .args(&["init", "--pattern", "*.txt", "--prompt", "x", "-n", "0"])
        .exits_with(2);
}
