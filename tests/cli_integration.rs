//! Integration tests for the `tk` CLI.
//!
//! Each test creates a temp store directory, runs `tk` as a subprocess
//! against it with -C, and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the built `tk` binary.
fn tk_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tk");
    path
}

fn tk(store: &Path, args: &[&str]) -> Output {
    Command::new(tk_bin())
        .arg("-C")
        .arg(store)
        .args(args)
        .output()
        .expect("failed to run tk")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn add_then_list() {
    let tmp = TempDir::new().unwrap();
    let out = tk(tmp.path(), &["add", "buy milk"]);
    assert!(out.status.success(), "add failed: {:?}", out);

    let out = tk(tmp.path(), &["list"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("buy milk"), "list output: {}", text);
    assert!(text.contains("[ ]"));
}

#[test]
fn add_blank_fails_without_writing() {
    let tmp = TempDir::new().unwrap();
    let out = tk(tmp.path(), &["add", "   "]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("todos.json").exists());
}

#[test]
fn done_moves_item_to_completed() {
    let tmp = TempDir::new().unwrap();
    tk(tmp.path(), &["add", "buy milk"]);
    tk(tmp.path(), &["add", "walk dog"]);

    let out = tk(tmp.path(), &["done", "1"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("moved to completed"));

    let text = stdout(&tk(tmp.path(), &["list"]));
    assert!(!text.contains("buy milk"));
    assert!(text.contains("walk dog"));

    let text = stdout(&tk(tmp.path(), &["list", "--completed"]));
    assert!(text.contains("buy milk"));
    assert!(text.contains("[x]"));
}

#[test]
fn done_toggles_in_place_when_flat() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path()).unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[store]\ntrack_completed_separately = false\n",
    )
    .unwrap();
    tk(tmp.path(), &["add", "buy milk"]);

    tk(tmp.path(), &["done", "1"]);
    let text = stdout(&tk(tmp.path(), &["list"]));
    assert!(text.contains("[x] buy milk"));

    // toggling again restores the flag
    tk(tmp.path(), &["done", "1"]);
    let text = stdout(&tk(tmp.path(), &["list"]));
    assert!(text.contains("[ ] buy milk"));
}

#[test]
fn edit_replaces_text() {
    let tmp = TempDir::new().unwrap();
    tk(tmp.path(), &["add", "buy milk"]);
    let out = tk(tmp.path(), &["edit", "1", "buy oat milk"]);
    assert!(out.status.success());

    let text = stdout(&tk(tmp.path(), &["list"]));
    assert!(text.contains("buy oat milk"));
}

#[test]
fn edit_out_of_range_is_an_error() {
    let tmp = TempDir::new().unwrap();
    tk(tmp.path(), &["add", "only"]);
    let out = tk(tmp.path(), &["edit", "5", "nope"]);
    assert!(!out.status.success());
    let text = stdout(&tk(tmp.path(), &["list"]));
    assert!(text.contains("only"));
}

#[test]
fn rm_removes_multiple_regardless_of_order() {
    for numbers in [["1", "3"], ["3", "1"]] {
        let tmp = TempDir::new().unwrap();
        for t in ["a", "b", "c"] {
            tk(tmp.path(), &["add", t]);
        }
        let out = tk(tmp.path(), &["rm", numbers[0], numbers[1]]);
        assert!(out.status.success());
        let text = stdout(&tk(tmp.path(), &["list"]));
        assert!(!text.contains(" a"));
        assert!(text.contains(" b"));
        assert!(!text.contains(" c"));
    }
}

#[test]
fn rm_out_of_range_leaves_list_untouched() {
    let tmp = TempDir::new().unwrap();
    tk(tmp.path(), &["add", "keep me"]);
    let out = tk(tmp.path(), &["rm", "2"]);
    assert!(!out.status.success());
    let text = stdout(&tk(tmp.path(), &["list"]));
    assert!(text.contains("keep me"));
}

#[test]
fn rm_completed_item() {
    let tmp = TempDir::new().unwrap();
    tk(tmp.path(), &["add", "task"]);
    tk(tmp.path(), &["done", "1"]);
    let out = tk(tmp.path(), &["rm", "--completed", "1"]);
    assert!(out.status.success());
    let text = stdout(&tk(tmp.path(), &["list", "--completed"]));
    assert!(text.contains("(empty)"));
}

#[test]
fn json_output_is_parseable() {
    let tmp = TempDir::new().unwrap();
    tk(tmp.path(), &["add", "buy milk"]);
    tk(tmp.path(), &["add", "walk dog"]);
    tk(tmp.path(), &["done", "2"]);

    let out = tk(tmp.path(), &["list", "--all", "--json"]);
    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let items = parsed["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "buy milk");
    assert_eq!(items[0]["number"], 1);
    assert_eq!(items[0]["done"], false);
    let completed = parsed["completed"].as_array().unwrap();
    assert_eq!(completed[0]["text"], "walk dog");
    assert_eq!(completed[0]["done"], true);
}

#[test]
fn legacy_records_without_done_are_listed_open() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path()).unwrap();
    fs::write(tmp.path().join("todos.json"), r#"[{"text":"old style"}]"#).unwrap();

    let text = stdout(&tk(tmp.path(), &["list"]));
    assert!(text.contains("[ ] old style"));
}

#[test]
fn corrupt_store_still_lists_and_journals() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path()).unwrap();
    fs::write(tmp.path().join("todos.json"), "not json {{{").unwrap();

    let out = tk(tmp.path(), &["list"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("(empty)"));

    let out = tk(tmp.path(), &["journal"]);
    assert!(stdout(&out).contains("unparseable stored value"));
}

#[test]
fn journal_clear() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path()).unwrap();
    fs::write(tmp.path().join("todos.json"), "bad").unwrap();
    tk(tmp.path(), &["list"]);

    let out = tk(tmp.path(), &["journal", "--clear"]);
    assert!(out.status.success());
    let out = tk(tmp.path(), &["journal"]);
    assert!(stdout(&out).contains("journal is empty"));
}

#[test]
fn config_show_and_set() {
    let tmp = TempDir::new().unwrap();
    let text = stdout(&tk(tmp.path(), &["config"]));
    assert!(text.contains("track_completed_separately = true"));
    assert!(text.contains("multi_select = false"));

    let out = tk(tmp.path(), &["config", "multi_select", "true"]);
    assert!(out.status.success());
    let text = stdout(&tk(tmp.path(), &["config", "multi_select"]));
    assert!(text.contains("multi_select = true"));
}

#[test]
fn config_rejects_unknown_option() {
    let tmp = TempDir::new().unwrap();
    let out = tk(tmp.path(), &["config", "bogus", "true"]);
    assert!(!out.status.success());
}

#[test]
fn add_json_reports_number_and_id() {
    let tmp = TempDir::new().unwrap();
    let out = tk(tmp.path(), &["add", "task", "--json"]);
    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(parsed["number"], 1);
    assert_eq!(parsed["text"], "task");
    assert!(parsed["id"].as_u64().unwrap() > 0);
}
