use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Task, UpdateTaskPayload};
use crate::store::TaskStore;

/// The five CRUD operations over the store.
///
/// Every operation runs its full load/mutate/save cycle under one in-process
/// lock, so interleaved requests cannot overwrite each other's saves. The
/// file itself remains the single source of truth between requests; nothing
/// is cached in memory.
pub struct TaskService {
    store: TaskStore,
    write_lock: Mutex<()>,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let _guard = self.write_lock.lock().await;
        Ok(self.store.load()?.tasks)
    }

    pub async fn create_task(&self, text: &str) -> AppResult<Task> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("text required".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut state = self.store.load()?;
        let task = Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            done: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.tasks.push(task.clone());
        self.store.save(&state)?;
        debug!(id = %task.id, "created task");
        Ok(task)
    }

    pub async fn get_task(&self, id: &str) -> AppResult<Task> {
        let _guard = self.write_lock.lock().await;
        let state = self.store.load()?;
        state
            .tasks
            .into_iter()
            .find(|task| task.id == id)
            .ok_or_else(|| AppError::NotFound("task not found".to_string()))
    }

    pub async fn update_task(&self, id: &str, payload: UpdateTaskPayload) -> AppResult<Task> {
        if let Some(text) = payload.text.as_deref() {
            if text.trim().is_empty() {
                return Err(AppError::Validation("text must not be empty".to_string()));
            }
        }

        let _guard = self.write_lock.lock().await;
        let mut state = self.store.load()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| AppError::NotFound("task not found".to_string()))?;

        if let Some(text) = payload.text {
            task.text = text;
        }
        if let Some(done) = payload.done {
            task.done = done;
        }
        // An update with neither field still refreshes the timestamp.
        task.updated_at = Some(Utc::now());
        let updated = task.clone();

        self.store.save(&state)?;
        debug!(id = %updated.id, done = updated.done, "updated task");
        Ok(updated)
    }

    pub async fn delete_task(&self, id: &str) -> AppResult<Task> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.store.load()?;
        let index = state
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::NotFound("task not found".to_string()))?;
        let removed = state.tasks.remove(index);
        self.store.save(&state)?;
        debug!(id = %removed.id, "deleted task");
        Ok(removed)
    }
}
