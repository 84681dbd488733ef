//! `fanout status`, `results`, `report` and `list` specs.

use crate::prelude::*;

fn finished_batch(temp: &Project) -> String {
    temp.file("src/a.py", "");
    temp.file("src/b.py", "");
    let id = temp.init_shell_batch("src/*.py", "echo 'looked at $item'; [ '$item' = 'src/a.py' ]");
    temp.fanout().args(&["run", "-b", &id]).passes();
    id
}

#[test]
fn status_text_shows_counts_and_items() {
    let temp = Project::empty();
    temp.file("x.txt", "");
    let id = temp.init_shell_batch("*.txt", "true");

    temp.fanout()
        .args(&["status", "-b", &id])
        .passes()
        .stdout_has(&format!("Batch {id}"))
        .stdout_has("pending      1")
        .stdout_has("pending x.txt");
}

#[test]
fn status_json_is_machine_readable() {
    let temp = Project::empty();
    let id = finished_batch(&temp);

    let out = temp.fanout().args(&["status", "-b", &id, "-o", "json"]).passes();
    let json: serde_json::Value = serde_json::from_str(out.stdout()).unwrap();
    assert_eq!(json["batch_id"], id.as_str());
    assert_eq!(json["summary"]["done"], 1);
    assert_eq!(json["summary"]["failed"], 1);
    assert_eq!(json["items"][1]["summary"], "looked at src/b.py");
}

#[test]
fn results_lists_compact_summaries() {
    let temp = Project::empty();
    let id = finished_batch(&temp);
    let results = temp.batch_dir(&id).join("results");
    std::fs::write(
        results.join("src_a_py.json"),
        r#"{"item": "src/a.py", "exit_code": 0, "summary": "structured verdict"}"#,
    )
    .unwrap();
    std::fs::write(results.join("garbage.json"), "{not json").unwrap();

    temp.fanout()
        .args(&["results", "-b", &id])
        .passes()
        .stdout_has("src/a.py (exit 0): structured verdict")
        .stdout_has("garbage: Error reading result file");
}

#[test]
fn results_json_lists_every_file() {
    let temp = Project::empty();
    let id = finished_batch(&temp);
    let out = temp.fanout().args(&["results", "-b", &id, "-o", "json"]).passes();
    let json: serde_json::Value = serde_json::from_str(out.stdout()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn report_lists_remaining_items() {
    let temp = Project::empty();
    temp.file("x.txt", "");
    let id = temp.init_shell_batch("*.txt", "true");

    temp.fanout()
        .args(&["report", "-b", &id])
        .passes()
        .stdout_has(&format!("# Batch Report: {id}"))
        .stdout_has("| Pending | 1 |")
        .stdout_has("## Remaining Items\n\n- x.txt (pending)\n");
    assert!(temp.read(&format!(".fanout/batch/{id}/report.md")).contains("x.txt (pending)"));
}

#[test]
fn list_shows_batches_with_counts() {
    let temp = Project::empty();
    let id = finished_batch(&temp);
    temp.fanout()
        .args(&["list"])
        .passes()
        .stdout_has(&format!("{id}  2 item(s): 1 done, 1 failed, 0 pending"));
}

#[test]
fn list_without_batches() {
    Project::empty().fanout().args(&["list"]).passes().stdout_has("No batches");
}

#[test]
fn unknown_batch_is_reported_everywhere() {
    let temp = Project::empty();
    for command in ["status", "report", "results"] {
        temp.fanout()
            .args(&[command, "-b", "nope"])
            .exits_with(1)
            .stderr_has("batch not found: nope");
    }
}
