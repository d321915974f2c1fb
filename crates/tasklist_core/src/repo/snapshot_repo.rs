//! Task list snapshot persistence.
//!
//! # Responsibility
//! - Serialize the full ordered task list under one fixed storage key.
//! - Rebuild task records (including `createdAt` timestamps) on load.
//!
//! # Invariants
//! - Save is a total overwrite of the previous snapshot.
//! - Load never fails on snapshot content: an unreadable snapshot yields an
//!   empty list plus a `corrupt` diagnostic.
//! - Load only fails on storage transport errors.

use crate::model::task::Task;
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task list.
pub const TASKS_STORAGE_KEY: &str = "todos";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot persistence errors.
#[derive(Debug)]
pub enum SnapshotError {
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for SnapshotError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Load/save contract for the task list snapshot.
pub trait SnapshotRepository {
    fn load(&self) -> SnapshotResult<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> SnapshotResult<()>;
}

/// Snapshot repository writing JSON text through a [`KeyValueStore`].
pub struct KvSnapshotRepository<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> KvSnapshotRepository<S> {
    /// Uses the default [`TASKS_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TASKS_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Drops the persisted snapshot entirely.
    pub fn clear(&self) -> SnapshotResult<()> {
        self.storage.remove(&self.key)?;
        Ok(())
    }
}

impl<S: KeyValueStore> SnapshotRepository for KvSnapshotRepository<S> {
    fn load(&self) -> SnapshotResult<Vec<Task>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            debug!("event=snapshot_load module=repo status=empty");
            return Ok(Vec::new());
        };

        match decode_snapshot(&raw) {
            Ok(tasks) => {
                debug!(
                    "event=snapshot_load module=repo status=ok count={}",
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(err) => {
                // Corrupted bytes stay in storage until the next save replaces them.
                warn!(
                    "event=snapshot_load module=repo status=corrupt bytes={} line={} column={} error_code=snapshot_decode_failed",
                    raw.len(),
                    err.line(),
                    err.column()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> SnapshotResult<()> {
        let encoded = encode_snapshot(tasks)?;
        self.storage.set(&self.key, &encoded)?;
        debug!(
            "event=snapshot_save module=repo status=ok count={} bytes={}",
            tasks.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Serializes a task list to snapshot text.
pub fn encode_snapshot(tasks: &[Task]) -> SnapshotResult<String> {
    serde_json::to_string(tasks).map_err(SnapshotError::Encode)
}

/// Parses snapshot text into task records.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Task>, serde_json::Error> {
    serde_json::from_str(raw)
}
