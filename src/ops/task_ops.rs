use crate::io::store::TaskStore;
use crate::model::task::Task;

/// Replace `original` with a task titled `new_title`.
///
/// The old task is deleted and a new one created carrying the old priority;
/// if the old task was completed the new one is toggled complete as well.
/// The replacement therefore gets a fresh id. Returns the new task as stored.
pub fn edit_task(store: &TaskStore, original: &Task, new_title: &str) -> Task {
    let completed = original.completed;
    let priority = original.priority;

    store.delete(&original.id);
    let created = store.create(new_title, priority);

    if completed {
        store.toggle_completed(&created.id).unwrap_or(created)
    } else {
        created
    }
}
