use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::models::StoreState;

/// Durable persistence for the task list.
///
/// The whole state lives in a single JSON document; every `load` reads the
/// full file and every `save` rewrites it in full. The file and its parent
/// directory are created on first access.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("db.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and, if the file is absent, seed it with
    /// an empty state. Safe to call any number of times.
    pub fn ensure_exists(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                AppError::StoreWrite(format!("{}: {error}", self.path.display()))
            })?;
        }
        if !self.path.exists() {
            self.write_state(&StoreState::default())?;
        }
        Ok(())
    }

    pub fn load(&self) -> AppResult<StoreState> {
        self.ensure_exists()?;
        let raw = fs::read_to_string(&self.path)
            .map_err(|error| AppError::Io(format!("{}: {error}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|error| AppError::CorruptStore(format!("{}: {error}", self.path.display())))
    }

    pub fn save(&self, state: &StoreState) -> AppResult<()> {
        self.ensure_exists()?;
        self.write_state(state)
    }

    fn write_state(&self, state: &StoreState) -> AppResult<()> {
        let body = serde_json::to_string_pretty(state)
            .map_err(|error| AppError::StoreWrite(format!("{}: {error}", self.path.display())))?;
        fs::write(&self.path, body)
            .map_err(|error| AppError::StoreWrite(format!("{}: {error}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::errors::AppError;
    use crate::models::{StoreState, Task};
    use chrono::Utc;

    fn sample_task(id: &str, text: &str) -> Task {
        Task {
            id: id.to_string(),
            text: text.to_string(),
            done: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn ensure_exists_seeds_empty_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TaskStore::new(&dir.path().join("data"));

        store.ensure_exists().expect("ensure");
        let raw = std::fs::read_to_string(store.path()).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        assert_eq!(value, serde_json::json!({ "tasks": [] }));
    }

    #[test]
    fn ensure_exists_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TaskStore::new(dir.path());

        let state = StoreState {
            tasks: vec![sample_task("a", "water the plants")],
        };
        store.save(&state).expect("save");

        store.ensure_exists().expect("first ensure");
        store.ensure_exists().expect("second ensure");
        assert_eq!(store.load().expect("load"), state);
    }

    #[test]
    fn load_on_missing_file_returns_empty_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TaskStore::new(&dir.path().join("nested").join("deeper"));

        let state = store.load().expect("load");
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TaskStore::new(dir.path());

        let mut done_task = sample_task("b", "file taxes");
        done_task.done = true;
        done_task.updated_at = Some(Utc::now());
        let state = StoreState {
            tasks: vec![sample_task("a", "buy milk"), done_task],
        };

        store.save(&state).expect("save");
        assert_eq!(store.load().expect("load"), state);
    }

    #[test]
    fn malformed_file_fails_as_corrupt_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TaskStore::new(dir.path());

        std::fs::write(store.path(), "{not json").expect("write");
        match store.load() {
            Err(AppError::CorruptStore(_)) => {}
            other => panic!("expected CorruptStore, got {other:?}"),
        }
    }

    #[test]
    fn serialized_task_omits_updated_at_until_set() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TaskStore::new(dir.path());

        let state = StoreState {
            tasks: vec![sample_task("a", "buy milk")],
        };
        store.save(&state).expect("save");

        let raw = std::fs::read_to_string(store.path()).expect("read");
        assert!(raw.contains("createdAt"));
        assert!(!raw.contains("updatedAt"));
    }
}
