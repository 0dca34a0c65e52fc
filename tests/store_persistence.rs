//! Integration tests for the store against the disk-backed bridge: every
//! mutation lands in `tasks.json`, and a fresh load (simulated restart)
//! reproduces the same list.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ticklist::io::bridge::DirBridge;
use ticklist::model::task::{Task, TaskId};
use ticklist::model::view::Filter;
use ticklist::store::TaskStore;

fn store_in(dir: &TempDir) -> TaskStore<DirBridge> {
    TaskStore::load(DirBridge::new(dir.path()))
}

#[test]
fn restart_round_trip_preserves_the_list() {
    let tmp = TempDir::new().unwrap();

    let mut store = store_in(&tmp);
    let milk = store.add_task("Buy milk").unwrap();
    store.add_task("Walk dog").unwrap();
    store.toggle_completion(milk).unwrap();
    let before: Vec<Task> = store.tasks().to_vec();
    drop(store);

    let reloaded = store_in(&tmp);
    assert_eq!(reloaded.tasks(), &before[..]);
}

#[test]
fn stored_form_is_a_flat_json_array() {
    let tmp = TempDir::new().unwrap();

    let mut store = store_in(&tmp);
    store.add_task("Buy milk").unwrap();

    let raw = fs::read_to_string(tmp.path().join("tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["text"], "Buy milk");
    assert_eq!(records[0]["completed"], false);
    assert!(records[0]["id"].is_i64());
}

#[test]
fn scenario_add_add_toggle_then_filter_incomplete() {
    let tmp = TempDir::new().unwrap();

    let mut store = store_in(&tmp);
    let milk = store.add_task("Buy milk").unwrap();
    store.add_task("Walk dog").unwrap();
    store.toggle_completion(milk).unwrap();
    store.set_filter(Filter::Incomplete);

    let visible: Vec<&str> = store.visible().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(visible, ["Walk dog"]);
}

#[test]
fn rejected_add_leaves_no_file_behind() {
    let tmp = TempDir::new().unwrap();

    let mut store = store_in(&tmp);
    assert!(store.add_task("   ").is_err());
    assert!(!tmp.path().join("tasks.json").exists());
}

#[test]
fn malformed_storage_starts_empty_and_survives_until_overwritten() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), "not json {{{").unwrap();

    let mut store = store_in(&tmp);
    assert!(store.tasks().is_empty());
    // The broken value is still on disk: nothing was mutated yet
    assert_eq!(
        fs::read_to_string(tmp.path().join("tasks.json")).unwrap(),
        "not json {{{"
    );

    // First successful mutation replaces it with a valid list
    store.add_task("fresh start").unwrap();
    drop(store);
    let reloaded = store_in(&tmp);
    assert_eq!(reloaded.tasks().len(), 1);
    assert_eq!(reloaded.tasks()[0].text, "fresh start");
}

#[test]
fn edits_persist_including_the_empty_text_case() {
    let tmp = TempDir::new().unwrap();

    let mut store = store_in(&tmp);
    let id = store.add_task("draft wording").unwrap();
    store.begin_edit(id, "draft wording");
    store.commit_edit(id, "final wording").unwrap();
    drop(store);

    let reloaded = store_in(&tmp);
    assert_eq!(reloaded.tasks()[0].text, "final wording");

    // Editing to empty is allowed (creation validates, edits do not) and
    // the empty text round-trips like any other
    let mut store = store_in(&tmp);
    store.begin_edit(id, "final wording");
    store.commit_edit(id, "").unwrap();
    drop(store);

    let reloaded = store_in(&tmp);
    assert_eq!(reloaded.tasks()[0].text, "");
}

#[test]
fn remove_of_absent_id_does_not_rewrite_the_file() {
    let tmp = TempDir::new().unwrap();

    let mut store = store_in(&tmp);
    store.add_task("only one").unwrap();
    let before = fs::metadata(tmp.path().join("tasks.json"))
        .unwrap()
        .modified()
        .unwrap();

    store.remove_task(TaskId(424242)).unwrap();
    let after = fs::metadata(tmp.path().join("tasks.json"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(before, after);
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn ids_stay_unique_across_a_restart() {
    let tmp = TempDir::new().unwrap();

    let mut store = store_in(&tmp);
    let a = store.add_task("one").unwrap();
    let b = store.add_task("two").unwrap();
    drop(store);

    let mut reloaded = store_in(&tmp);
    let c = reloaded.add_task("three").unwrap();

    let mut ids = vec![a, b, c];
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}
