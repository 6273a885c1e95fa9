//! Task store use-case service.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection.
//! - Mirror the collection to key-value persistence after each mutation.
//!
//! # Invariants
//! - Ordering is insertion order, newest-created record first.
//! - Editing a record never changes its position.
//! - In-memory state stays authoritative when a sync write fails.

use crate::model::task::{Task, TaskDraft, TaskId, TaskValidationError};
use crate::repo::kv_repo::KvRepository;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed persistence key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks_v1";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for task lifecycle operations.
///
/// Persistence failures are deliberately absent: sync is fire-and-forget and
/// surfaces as a warning log, never as an operation failure.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Authoritative owner of the task collection.
///
/// Every mutation runs to completion in memory first, then triggers a
/// full-overwrite save of the serialized collection under [`TASKS_KEY`].
pub struct TaskStore<R: KvRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: KvRepository> TaskStore<R> {
    /// Loads the persisted collection at startup.
    ///
    /// An absent entry, a read failure, or an unparseable payload all yield
    /// an empty collection; this constructor never fails the caller.
    pub fn load(repo: R) -> Self {
        let tasks = match repo.read_entry(TASKS_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Task>>(&payload) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(
                        "event=task_load module=store status=recovered reason=parse_error error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=task_load module=store status=recovered reason=read_error error={err}");
                Vec::new()
            }
        };

        info!(
            "event=task_load module=store status=ok count={}",
            tasks.len()
        );
        Self { repo, tasks }
    }

    /// Creates a new record from the draft and inserts it at the front.
    ///
    /// Fails with `Validation` when the title trims to empty; the collection
    /// is untouched in that case.
    pub fn add(&mut self, draft: &TaskDraft) -> StoreResult<Task> {
        let task = Task::from_draft(draft)?;
        self.tasks.insert(0, task.clone());
        info!("event=task_add module=store status=ok id={}", task.id);
        self.sync();
        Ok(task)
    }

    /// Replaces all editable fields of the matching record atomically.
    ///
    /// # Invariants
    /// - `id` and `created_at` are preserved.
    /// - The record keeps its position in the collection.
    pub fn update(&mut self, id: TaskId, draft: &TaskDraft) -> StoreResult<Task> {
        draft.validate()?;
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Err(StoreError::NotFound(id));
        };

        task.apply_draft(draft)?;
        let updated = task.clone();
        info!("event=task_update module=store status=ok id={id}");
        self.sync();
        Ok(updated)
    }

    /// Removes the record with the matching id.
    ///
    /// Returns `false` without side effects when nothing matches; a stale id
    /// is not an error here. Any confirmation step happens before this call.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return false;
        };

        self.tasks.remove(index);
        info!("event=task_delete module=store status=ok id={id}");
        self.sync();
        true
    }

    /// Ordered read-only view of the collection, newest-created first.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Read-only lookup by id, used to pre-populate edit flows.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Serializes the whole collection and overwrites the persisted entry.
    ///
    /// Failures leave the in-memory state authoritative for the rest of the
    /// session and are reported as non-fatal warnings.
    fn sync(&mut self) {
        let payload = match serde_json::to_string(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("event=task_sync module=store status=error reason=serialize error={err}");
                return;
            }
        };

        if let Err(err) = self.repo.write_entry(TASKS_KEY, &payload) {
            warn!("event=task_sync module=store status=error reason=write error={err}");
        }
    }
}
