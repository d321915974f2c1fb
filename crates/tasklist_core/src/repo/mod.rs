//! Repository layer for persisted task list state.
//!
//! # Responsibility
//! - Define the snapshot load/save contract used by the store.
//! - Keep serialization details out of store orchestration.
//!
//! # Invariants
//! - A snapshot always holds the complete list, never a delta.

pub mod snapshot_repo;
