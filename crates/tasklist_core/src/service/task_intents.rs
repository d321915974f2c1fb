//! Presentation-facing task intents.
//!
//! # Responsibility
//! - Apply the form/item-view guards before forwarding to the store.
//! - Keep UI callers from constructing records or ids themselves.
//!
//! # Invariants
//! - A blank title never reaches `TaskListStore::add` or a title update.
//! - Titles are forwarded exactly as typed; only emptiness is checked.

use crate::model::task::{validate_title, NewTask, Priority, Task, TaskId, TaskUpdate};
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::service::task_store::{StoreResult, TaskListStore};
use log::info;

/// Form state for creating one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Submits a draft as a new, not-yet-completed task.
///
/// Returns `Ok(None)` when the title is blank; nothing is created or saved.
pub fn submit_draft<R: SnapshotRepository>(
    store: &mut TaskListStore<R>,
    draft: TaskDraft,
) -> StoreResult<Option<Task>> {
    if validate_title(&draft.title).is_err() {
        info!("event=intent_rejected module=service status=ok intent=add reason=empty_title");
        return Ok(None);
    }

    let input = NewTask {
        title: draft.title,
        description: draft.description,
        priority: draft.priority,
        completed: false,
    };
    store.add(input).map(Some)
}

/// Saves an inline edit of title and description.
///
/// Returns `Ok(None)` for a blank title or an unknown id.
pub fn save_edit<R: SnapshotRepository>(
    store: &mut TaskListStore<R>,
    id: TaskId,
    title: impl Into<String>,
    description: impl Into<String>,
) -> StoreResult<Option<Task>> {
    let title = title.into();
    if validate_title(&title).is_err() {
        info!(
            "event=intent_rejected module=service status=ok intent=edit reason=empty_title task_id={id}"
        );
        return Ok(None);
    }

    let update = TaskUpdate {
        title: Some(title),
        description: Some(description.into()),
        ..TaskUpdate::default()
    };
    store.update(id, update)
}

/// Toggles the completion checkbox.
pub fn set_completed<R: SnapshotRepository>(
    store: &mut TaskListStore<R>,
    id: TaskId,
    completed: bool,
) -> StoreResult<Option<Task>> {
    store.update(id, TaskUpdate::completed(completed))
}

/// Changes only the priority label.
pub fn set_priority<R: SnapshotRepository>(
    store: &mut TaskListStore<R>,
    id: TaskId,
    priority: Priority,
) -> StoreResult<Option<Task>> {
    store.update(id, TaskUpdate::priority(priority))
}

/// Deletes a task. `Ok(false)` when the id is unknown.
pub fn remove<R: SnapshotRepository>(store: &mut TaskListStore<R>, id: TaskId) -> StoreResult<bool> {
    store.delete(id)
}
