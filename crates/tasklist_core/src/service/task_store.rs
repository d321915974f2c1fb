//! Task list store.
//!
//! # Responsibility
//! - Own the authoritative ordered task list for one session.
//! - Persist the complete list after every effective mutation.
//!
//! # Invariants
//! - The store is the only writer of its list.
//! - New tasks are prepended; nothing else reorders the list.
//! - Update/delete on an unknown id leave the list unchanged and skip the save.
//! - An update carrying no fields skips the save.
//! - Two stores sharing one storage do not coordinate: the last save wins.

use crate::model::task::{NewTask, Task, TaskId, TaskUpdate};
use crate::repo::snapshot_repo::{SnapshotError, SnapshotRepository};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level errors.
#[derive(Debug)]
pub enum StoreError {
    /// The mutation was applied in memory but the snapshot write failed.
    Persist(SnapshotError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "failed to persist task list: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Persist(value)
    }
}

/// In-memory task list backed by a snapshot repository.
pub struct TaskListStore<R: SnapshotRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: SnapshotRepository> TaskListStore<R> {
    /// Builds the store from the persisted snapshot.
    ///
    /// Never fails: a missing, corrupted or unreadable snapshot starts an
    /// empty list.
    pub fn initialize(repo: R) -> Self {
        let tasks = match repo.load() {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(
                    "event=store_init module=service status=error error_code=snapshot_read_failed error={err}"
                );
                Vec::new()
            }
        };
        info!(
            "event=store_init module=service status=ok count={}",
            tasks.len()
        );
        Self { repo, tasks }
    }

    /// Current ordered list, most recent first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a task with fresh identity and prepends it.
    ///
    /// Title validation belongs to the caller (see `task_intents`).
    pub fn add(&mut self, input: NewTask) -> StoreResult<Task> {
        let task = Task::create(input);
        self.tasks.insert(0, task.clone());
        info!(
            "event=task_add module=service status=ok task_id={} count={}",
            task.id,
            self.tasks.len()
        );
        self.persist()?;
        Ok(task)
    }

    /// Merges `update` into the task with `id`.
    ///
    /// Returns `Ok(None)` without saving when no task matches. An empty
    /// update returns the current record without saving.
    pub fn update(&mut self, id: TaskId, update: TaskUpdate) -> StoreResult<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            info!("event=task_update module=service status=not_found task_id={id}");
            return Ok(None);
        };
        if update.is_empty() {
            info!("event=task_update module=service status=unchanged task_id={id}");
            return Ok(Some(task.clone()));
        }
        task.apply(update);
        let updated = task.clone();
        info!("event=task_update module=service status=ok task_id={id}");
        self.persist()?;
        Ok(Some(updated))
    }

    /// Removes the task with `id`.
    ///
    /// Returns `Ok(false)` without saving when no task matches.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<bool> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            info!("event=task_delete module=service status=not_found task_id={id}");
            return Ok(false);
        };
        self.tasks.remove(index);
        info!(
            "event=task_delete module=service status=ok task_id={id} count={}",
            self.tasks.len()
        );
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> StoreResult<()> {
        self.repo.save(&self.tasks).map_err(|err| {
            error!(
                "event=snapshot_save module=service status=error error_code=snapshot_write_failed error={err}"
            );
            StoreError::Persist(err)
        })
    }
}
