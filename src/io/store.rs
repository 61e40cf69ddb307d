use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use ulid::Ulid;

use crate::io::recovery::{
    RecoveryCategory, RecoveryEntry, atomic_write, log_recovery, read_recovery_entries,
};
use crate::model::{Settings, Task, TaskDocument};

const TASKS_FILE: &str = "tasks.json";
const SETTINGS_FILE: &str = "settings.json";

/// Directory name under the user's home
pub const STORE_DIR_NAME: &str = ".tydid";

/// Error type for task store I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not determine the home directory")]
    NoHomeDir,
    #[error("could not create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the on-disk task collection and settings record.
///
/// Every operation is a full read-modify-write of the backing file; nothing is
/// cached between calls. Read failures degrade to an empty collection (or default
/// settings) and write failures are only recorded in the recovery log, so callers
/// never see an error after [`TaskStore::open`] succeeds.
#[derive(Debug, Clone)]
pub struct TaskStore {
    dir: PathBuf,
}

impl TaskStore {
    /// `~/.tydid`
    pub fn default_dir() -> Result<PathBuf, StoreError> {
        dirs::home_dir()
            .map(|home| home.join(STORE_DIR_NAME))
            .ok_or(StoreError::NoHomeDir)
    }

    /// Open the store rooted at `dir`, creating and seeding it on first use.
    ///
    /// - missing directory: created (failure here is the only fatal error)
    /// - missing tasks document: seeded with three example tasks
    /// - unparseable tasks document (not JSON, or `tasks` not an array): logged
    ///   and reset to an empty collection. Individual odd records never cause
    ///   a reset.
    /// - missing settings document: written with `vimMode: false`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;
        let store = TaskStore { dir };

        let tasks_path = store.tasks_path();
        if !tasks_path.exists() {
            let seed = store.seed_tasks();
            store.persist_tasks(&seed);
        } else if let Err(e) = store.read_tasks() {
            store.log_read_failure(&e);
            // Unreadable (as opposed to unparseable) documents are left in place
            if matches!(e, StoreError::Parse { .. }) {
                store.persist_tasks(&[]);
            }
        }

        if !store.settings_path().exists() {
            store.save_settings(&Settings::default());
        }

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// All tasks in insertion order. Empty if the document is missing or corrupt.
    pub fn list(&self) -> Vec<Task> {
        match self.read_tasks() {
            Ok(tasks) => tasks,
            Err(e) => {
                self.log_read_failure(&e);
                Vec::new()
            }
        }
    }

    /// Append a new incomplete task. `title` is stored as given.
    pub fn create(&self, title: &str, priority: bool) -> Task {
        let mut tasks = self.list();
        let task = Task {
            id: generate_id(&tasks),
            title: title.to_string(),
            completed: false,
            priority,
            created_at: created_stamp(),
        };
        tasks.push(task.clone());
        self.persist_tasks(&tasks);
        task
    }

    /// Flip `completed` on the matching task. `None` if no task has that id.
    pub fn toggle_completed(&self, id: &str) -> Option<Task> {
        self.update(id, |task| task.completed = !task.completed)
    }

    /// Set priority to `value`, or flip it when `value` is `None`.
    pub fn set_priority(&self, id: &str, value: Option<bool>) -> Option<Task> {
        self.update(id, |task| task.priority = value.unwrap_or(!task.priority))
    }

    /// Remove the matching task. The collection is rewritten even when nothing
    /// matched; the return value says whether a task was removed.
    pub fn delete(&self, id: &str) -> bool {
        let mut tasks = self.list();
        let before = tasks.len();
        let removed: Vec<Task> = tasks.iter().filter(|t| t.id == id).cloned().collect();
        tasks.retain(|t| t.id != id);
        self.persist_tasks(&tasks);

        for task in &removed {
            let body = serde_json::to_string_pretty(task).unwrap_or_default();
            log_recovery(
                &self.dir,
                RecoveryEntry::now(RecoveryCategory::Delete, format!("task {} deleted", task.id))
                    .field("Title", &task.title)
                    .body(body),
            );
        }

        tasks.len() != before
    }

    /// Current settings, or the defaults if the document is missing or unreadable.
    pub fn settings(&self) -> Settings {
        let path = self.settings_path();
        if !path.exists() {
            return Settings::default();
        }
        match read_json::<Settings>(&path) {
            Ok(settings) => settings,
            Err(e) => {
                self.log_read_failure(&e);
                Settings::default()
            }
        }
    }

    /// Overwrite the settings document. Returns whether the write succeeded.
    pub fn save_settings(&self, settings: &Settings) -> bool {
        let path = self.settings_path();
        match write_json(&path, settings, false) {
            Ok(()) => true,
            Err(e) => {
                self.log_write_failure(&e, serde_json::to_string(settings).unwrap_or_default());
                false
            }
        }
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut Task)) -> Option<Task> {
        let mut tasks = self.list();
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        f(task);
        let updated = task.clone();
        self.persist_tasks(&tasks);
        Some(updated)
    }

    fn read_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let path = self.tasks_path();
        let text = read_text(&path)?;
        let (doc, skipped) =
            TaskDocument::parse_lenient(&text).map_err(|e| StoreError::Parse {
                path: path.clone(),
                source: e,
            })?;
        if skipped > 0 {
            self.log_once(
                RecoveryEntry::now(
                    RecoveryCategory::Parser,
                    format!("skipped {} unreadable task record(s)", skipped),
                )
                .field("File", path.display())
                .body(text),
            );
        }
        Ok(doc.tasks)
    }

    fn persist_tasks(&self, tasks: &[Task]) {
        let doc = TaskDocument {
            tasks: tasks.to_vec(),
        };
        if let Err(e) = write_json(&self.tasks_path(), &doc, true) {
            self.log_write_failure(&e, serde_json::to_string_pretty(&doc).unwrap_or_default());
        }
    }

    fn seed_tasks(&self) -> Vec<Task> {
        let mut tasks = Vec::with_capacity(3);
        for (title, completed, priority) in [
            ("Important task", false, true),
            ("Regular task", false, false),
            ("Completed task", true, false),
        ] {
            let id = generate_id(&tasks);
            tasks.push(Task {
                id,
                title: title.to_string(),
                completed,
                priority,
                created_at: created_stamp(),
            });
        }
        tasks
    }

    fn log_read_failure(&self, err: &StoreError) {
        let entry = match err {
            StoreError::Parse { path, .. } => {
                // Keep the unparseable text so the user can recover it by hand
                let raw = fs::read_to_string(path).unwrap_or_default();
                RecoveryEntry::now(RecoveryCategory::Parser, err.to_string())
                    .field("File", path.display())
                    .body(raw)
            }
            StoreError::Read { path, .. } => {
                RecoveryEntry::now(RecoveryCategory::Read, err.to_string())
                    .field("File", path.display())
            }
            other => RecoveryEntry::now(RecoveryCategory::Read, other.to_string()),
        };
        self.log_once(entry);
    }

    /// Append `entry` unless the latest entry of its category says the same
    /// thing. Reads happen on every action, so a bad file is recorded once per
    /// distinct content rather than once per read.
    fn log_once(&self, entry: RecoveryEntry) {
        let repeated = read_recovery_entries(&self.dir, None)
            .into_iter()
            .find(|e| e.category == entry.category)
            .is_some_and(|last| {
                last.description == entry.description
                    && last.body.trim_end() == entry.body.trim_end()
            });
        if !repeated {
            log_recovery(&self.dir, entry);
        }
    }

    fn log_write_failure(&self, err: &StoreError, unsaved: String) {
        log_recovery(
            &self.dir,
            RecoveryEntry::now(RecoveryCategory::Write, err.to_string()).body(unsaved),
        );
    }
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), StoreError> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Random 8-digit id not used by any task in `existing`.
pub fn generate_id(existing: &[Task]) -> String {
    loop {
        let n = 10_000_000 + (Ulid::new().random() % 90_000_000) as u64;
        let id = n.to_string();
        if !existing.iter().any(|t| t.id == id) {
            return id;
        }
    }
}

/// Local time as `DDMMYYYYHHMM`
fn created_stamp() -> String {
    Local::now().format("%d%m%Y%H%M").to_string()
}
