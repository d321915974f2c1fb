//! Task list domain model.
//!
//! # Responsibility
//! - Define the task record and the partial payloads used to mutate it.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod task;
