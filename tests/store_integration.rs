//! Store and façade behavior across separate handles on one directory,
//! the way the interactive view and a script would share it.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tydid::api::Tydid;
use tydid::io::TaskStore;
use tydid::io::recovery::{RecoveryCategory, read_recovery_entries};
use tydid::ops::search::filter_tasks;
use tydid::ops::task_ops::edit_task;

fn titles(tasks: &[tydid::model::Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn first_run_layout_on_disk() {
    let tmp = TempDir::new().unwrap();
    let store = TaskStore::open(tmp.path()).unwrap();

    let raw = fs::read_to_string(store.tasks_path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let tasks = doc["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    for task in tasks {
        assert!(task["id"].is_string());
        assert!(task["createdAt"].is_string());
        assert!(task["completed"].is_boolean());
        assert!(task["priority"].is_boolean());
    }

    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.settings_path()).unwrap()).unwrap();
    assert_eq!(settings, serde_json::json!({ "vimMode": false }));
}

#[test]
fn facade_and_store_share_state() {
    let tmp = TempDir::new().unwrap();
    let tydid = Tydid::open(tmp.path()).unwrap();
    let store = TaskStore::open(tmp.path()).unwrap();

    let docs = tydid.add_task("Complete the documentation", false);
    let bug = tydid.add_task("Fix critical bug", true);
    assert!(bug.priority);

    tydid.complete_task(&docs.id);
    assert!(store.list().iter().any(|t| t.id == docs.id && t.completed));

    assert!(tydid.delete_task(&bug.id));
    assert!(!tydid.delete_task(&bug.id));
    assert_eq!(tydid.tasks().len(), 4);
}

#[test]
fn complete_twice_restores_and_missing_id_is_none() {
    let tmp = TempDir::new().unwrap();
    let tydid = Tydid::open(tmp.path()).unwrap();
    let before = tydid.tasks();

    let id = before[0].id.clone();
    tydid.complete_task(&id);
    tydid.complete_task(&id);
    assert_eq!(tydid.tasks(), before);

    assert_eq!(tydid.complete_task("00000000"), None);
    assert_eq!(tydid.tasks(), before);
}

#[test]
fn edit_and_search_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let store = TaskStore::open(tmp.path()).unwrap();
    for task in store.list() {
        store.delete(&task.id);
    }
    store.create("Fix critical bug", false);
    let docs = store.create("Write docs", true);
    store.create("BUGFIX release", false);

    let edited = edit_task(&store, &docs, "Write more docs");
    assert_ne!(edited.id, docs.id);
    assert!(edited.priority);

    let all = store.list();
    assert_eq!(
        titles(&all),
        vec!["Fix critical bug", "BUGFIX release", "Write more docs"]
    );
    let hits = filter_tasks(&all, "bug");
    assert_eq!(titles(&hits), vec!["Fix critical bug", "BUGFIX release"]);
    assert_eq!(store.list().len(), 3);
}

#[test]
fn corrupt_tasks_file_reads_as_empty_then_repairs() {
    let tmp = TempDir::new().unwrap();
    let store = TaskStore::open(tmp.path()).unwrap();
    fs::write(store.tasks_path(), "{ not json").unwrap();

    assert!(store.list().is_empty());

    let entries = read_recovery_entries(tmp.path(), None);
    assert!(
        entries
            .iter()
            .any(|e| e.category == RecoveryCategory::Parser && e.body.contains("{ not json"))
    );

    let reopened = TaskStore::open(tmp.path()).unwrap();
    assert!(reopened.list().is_empty());
    let task = reopened.create("fresh start", false);
    assert_eq!(reopened.list(), vec![task]);
}

#[test]
fn corrupt_settings_fall_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let store = TaskStore::open(tmp.path()).unwrap();
    fs::write(store.settings_path(), "vimMode = true").unwrap();
    assert!(!store.settings().vim_mode);
}

#[test]
fn deletions_are_recoverable_from_the_log() {
    let tmp = TempDir::new().unwrap();
    let tydid = Tydid::open(tmp.path()).unwrap();
    let task = tydid.add_task("Throw away", false);
    tydid.delete_task(&task.id);

    let entries = read_recovery_entries(tmp.path(), Some(1));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, RecoveryCategory::Delete);
    assert!(entries[0].body.contains("Throw away"));
}
