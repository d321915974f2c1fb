//! Core domain logic for the task list.
//! This crate is the single source of truth for task list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    parse_priority, validate_title, NewTask, Priority, Task, TaskId, TaskUpdate,
    TaskValidationError,
};
pub use repo::snapshot_repo::{
    KvSnapshotRepository, SnapshotError, SnapshotRepository, SnapshotResult, TASKS_STORAGE_KEY,
};
pub use service::task_intents::TaskDraft;
pub use service::task_store::{StoreError, StoreResult, TaskListStore};
pub use storage::sqlite_kv::SqliteKeyValueStore;
pub use storage::{KeyValueStore, MemoryKeyValueStore, StorageError, StorageResult};

/// Minimal health-check API for linkage checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
