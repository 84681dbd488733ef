//! `fanout run` specs: execution, failure capture and resumption.

use crate::prelude::*;

/// Worker script: succeeds for `src/a.py`, fails for everything else.
const ONLY_A_PASSES: &str = "echo 'checked $item'; [ '$item' = 'src/a.py' ]";

#[test]
fn run_records_success_and_failure() {
    let temp = Project::empty();
    temp.file("src/a.py", "");
    temp.file("src/b.py", "");
    let id = temp.init_shell_batch("src/*.py", ONLY_A_PASSES);

    temp.fanout()
        .args(&["run", "-b", &id])
        .passes()
        .stdout_has("[done] src/a.py: checked src/a.py")
        .stdout_has("[failed] src/b.py: checked src/b.py")
        .stdout_has("1 done, 1 failed, 0 pending");

    let ledger = temp.ledger(&id);
    assert_eq!(
        ledger["summary"],
        serde_json::json!({"total": 2, "pending": 0, "active": 0, "done": 1, "failed": 1})
    );
    assert_eq!(ledger["items"][1]["exit_code"], 1);

    temp.fanout()
        .args(&["report", "-b", &id])
        .passes()
        .stdout_has("## Completed Items\n\n- **src/a.py**: checked src/a.py\n")
        .stdout_has("## Failed Items\n\n- **src/b.py** (exit 1): checked src/b.py\n");
    assert!(temp.batch_dir(&id).join("report.md").is_file());
}

#[test]
fn workers_run_in_project_root() {
    let temp = Project::empty();
    temp.file("src/a.py", "print('hi')\n");
    let id = temp.init_shell_batch("src/*.py", "head -n 1 $item");

    temp.fanout().args(&["run", "-b", &id]).passes().stdout_has("[done] src/a.py: print('hi')");
}

#[test]
fn rerun_only_touches_failed_items() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    temp.file("b.txt", "");
    let script = "echo '$item'; [ '$item' = 'a.txt' ] || [ -f flag ]";
    let id = temp.init_shell_batch("*.txt", script);

    temp.fanout().args(&["run", "-b", &id]).passes().stdout_has("1 done, 1 failed, 0 pending");
    let first = temp.ledger(&id);

    temp.file("flag", "");
    temp.fanout()
        .args(&["run", "-b", &id])
        .passes()
        .stdout_lacks("a.txt")
        .stdout_has("2 done, 0 failed, 0 pending");

    let second = temp.ledger(&id);
    assert_eq!(first["items"][0], second["items"][0]);
    assert_eq!(second["items"][1]["status"], "done");
}

#[test]
fn resume_recovers_items_left_active() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    temp.file("b.txt", "");
    let id = temp.init_shell_batch("*.txt", "echo ok");

    // Simulate a coordinator that died after claiming `a.txt`.
    let ledger_path = temp.batch_dir(&id).join("ledger.json");
    let mut ledger = temp.ledger(&id);
    ledger["items"][0]["status"] = "active".into();
    ledger["items"][0]["pid"] = i32::MAX.into();
    ledger["items"][0]["started_at"] = ledger["created_at"].clone();
    std::fs::write(&ledger_path, serde_json::to_vec_pretty(&ledger).unwrap()).unwrap();

    temp.fanout()
        .args(&["run", "-b", &id, "--resume"])
        .passes()
        .stdout_has("[done] a.txt: ok")
        .stdout_has("2 done, 0 failed, 0 pending");
}

#[test]
fn plain_run_points_at_resume_for_stuck_items() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    temp.file("b.txt", "");
    let id = temp.init_shell_batch("*.txt", "echo ok");

    let ledger_path = temp.batch_dir(&id).join("ledger.json");
    let mut ledger = temp.ledger(&id);
    ledger["items"][0]["status"] = "active".into();
    ledger["items"][0]["pid"] = i32::MAX.into();
    ledger["items"][0]["started_at"] = ledger["created_at"].clone();
    std::fs::write(&ledger_path, serde_json::to_vec_pretty(&ledger).unwrap()).unwrap();

    temp.fanout()
        .args(&["run", "-b", &id])
        .passes()
        .stdout_has("1 done, 0 failed, 0 pending, 1 active")
        .stderr_has("use --resume");

    let before = temp.ledger(&id);
    temp.fanout().args(&["run", "-b", &id, "--resume", "-n", "0"]).exits_with(1);
    assert_eq!(temp.ledger(&id), before);
}

#[test]
fn resume_of_finished_batch_runs_nothing() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    let id = temp.init_shell_batch("*.txt", "echo ok");
    temp.fanout().args(&["run", "-b", &id]).passes();
    let before = temp.ledger(&id);

    temp.fanout()
        .args(&["run", "-b", &id, "--resume"])
        .passes()
        .stdout_lacks("[done]")
        .stdout_has("1 done, 0 failed, 0 pending");
    assert_eq!(temp.ledger(&id), before);
}

#[test]
fn missing_worker_marks_items_failed() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    let out = temp
        .fanout()
        .args(&["init", "--pattern", "*.txt", "--prompt", "x", "--worker", "/nonexistent/agent"])
        .passes();
    let id = out.stdout().trim().to_string();

    temp.fanout()
        .args(&["run", "-b", &id])
        .passes()
        .stdout_has("failed to launch worker")
        .stdout_has("0 done, 1 failed, 0 pending");
}

#[test]
fn run_unknown_batch_fails() {
    let temp = Project::empty();
    temp.fanout()
        .args(&["run", "-b", "batch-19990101-000000"])
        .exits_with(1)
        .stderr_has("batch not found: batch-19990101-000000");
}

#[test]
fn run_with_zero_parallelism_fails() {
    let temp = Project::empty();
    temp.file("a.txt", "");
    let id = temp.init_shell_batch("*.txt", "true");
    temp.fanout().args(&["run", "-b", &id, "-n", "0"]).exits_with(1).stderr_has("at least 1");
}
