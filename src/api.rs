//! Non-interactive access to the task list, for scripts and other programs.
//!
//! ```no_run
//! use tydid::api::Tydid;
//!
//! let tydid = Tydid::open_default()?;
//! let task = tydid.add_task("Complete the documentation", false);
//! tydid.complete_task(&task.id);
//! for t in tydid.tasks() {
//!     println!("{} {}", t.status_mark(), t.title);
//! }
//! # Ok::<(), tydid::io::StoreError>(())
//! ```

use std::path::PathBuf;

use crate::io::store::{StoreError, TaskStore};
use crate::model::Task;

/// Thin wrapper over a [`TaskStore`] handle.
#[derive(Debug, Clone)]
pub struct Tydid {
    store: TaskStore,
}

impl Tydid {
    /// Use the store in `dir`, seeding it on first use.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Tydid {
            store: TaskStore::open(dir)?,
        })
    }

    /// Use the same store as the interactive view (`~/.tydid`).
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(TaskStore::default_dir()?)
    }

    pub fn add_task(&self, title: &str, priority: bool) -> Task {
        self.store.create(title, priority)
    }

    /// Toggles completion; calling it twice restores the original state.
    pub fn complete_task(&self, id: &str) -> Option<Task> {
        self.store.toggle_completed(id)
    }

    pub fn delete_task(&self, id: &str) -> bool {
        self.store.delete(id)
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.store.list()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}
