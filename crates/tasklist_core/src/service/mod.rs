//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory task list and its mutation operations.
//! - Expose the guarded intents the presentation layer calls.

pub mod task_intents;
pub mod task_store;
