//! Command execution against a task list store.

use crate::cli::Command;
use crate::render::{render_list, render_task};
use std::error::Error;
use tasklist_core::service::task_intents::{
    remove, save_edit, set_completed, set_priority, submit_draft,
};
use rusqlite::Connection;
use tasklist_core::{
    KeyValueStore, KvSnapshotRepository, SqliteKeyValueStore, TaskDraft, TaskId, TaskListStore,
};

pub type AppStore<S> = TaskListStore<KvSnapshotRepository<S>>;

/// Builds the store over a migrated connection and runs `command` on it.
///
/// `ping` and `version` never reach this point; see `main`.
pub fn run_on_connection(conn: &Connection, command: Command) -> Result<String, Box<dyn Error>> {
    let storage = SqliteKeyValueStore::try_new(conn)?;
    let mut store = TaskListStore::initialize(KvSnapshotRepository::new(storage));
    execute(&mut store, command)
}

/// Runs one store-backed command and returns the text to print.
pub fn execute<S: KeyValueStore>(
    store: &mut AppStore<S>,
    command: Command,
) -> Result<String, Box<dyn Error>> {
    let output = match command {
        Command::List => render_list(store.tasks()),
        Command::Add {
            title,
            description,
            priority,
        } => {
            let draft = TaskDraft {
                title,
                description,
                priority,
            };
            match submit_draft(store, draft)? {
                Some(task) => format!("added {}", render_task(&task)),
                None => "title cannot be empty; nothing added".to_string(),
            }
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            if store.get(id).is_none() {
                return Ok(not_found(id));
            }
            // Edits without --description keep the current text, like the inline editor.
            let description = match description {
                Some(description) => description,
                None => store
                    .get(id)
                    .map(|task| task.description.clone())
                    .unwrap_or_default(),
            };
            match save_edit(store, id, title, description)? {
                Some(task) => format!("updated {}", render_task(&task)),
                None => "title cannot be empty; nothing changed".to_string(),
            }
        }
        Command::Done { id } => updated_or_missing(
            id,
            set_completed(store, id, true)?.map(|task| render_task(&task)),
        ),
        Command::Undone { id } => updated_or_missing(
            id,
            set_completed(store, id, false)?.map(|task| render_task(&task)),
        ),
        Command::SetPriority { id, level } => updated_or_missing(
            id,
            set_priority(store, id, level)?.map(|task| render_task(&task)),
        ),
        Command::Delete { id } => {
            if remove(store, id)? {
                format!("deleted {id}")
            } else {
                not_found(id)
            }
        }
        Command::Reset => {
            store.repository().clear()?;
            "task list cleared".to_string()
        }
        Command::Ping => ping_line(),
        Command::Version => version_line(),
    };
    Ok(output)
}

/// Core linkage check output.
pub fn ping_line() -> String {
    format!("tasklist_core ping={}", tasklist_core::ping())
}

pub fn version_line() -> String {
    format!("tasklist_core version={}", tasklist_core::core_version())
}

fn updated_or_missing(id: TaskId, rendered: Option<String>) -> String {
    match rendered {
        Some(rendered) => format!("updated {rendered}"),
        None => not_found(id),
    }
}

fn not_found(id: TaskId) -> String {
    format!("task not found: {id}")
}

#[cfg(test)]
mod tests {
    use super::{execute, run_on_connection};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use tasklist_core::db::open_db_in_memory;
    use tasklist_core::{
        KeyValueStore, KvSnapshotRepository, MemoryKeyValueStore, Priority, TaskListStore,
        TASKS_STORAGE_KEY,
    };
    use uuid::Uuid;

    fn add(title: &str) -> Command {
        Command::Add {
            title: title.to_string(),
            description: String::new(),
            priority: Priority::Medium,
        }
    }

    #[test]
    fn add_then_list_renders_newest_first() {
        let storage = MemoryKeyValueStore::new();
        let mut store = TaskListStore::initialize(KvSnapshotRepository::new(storage.clone()));

        execute(&mut store, add("Buy milk")).unwrap();
        execute(&mut store, add("Write report")).unwrap();
        let listing = execute(&mut store, Command::List).unwrap();

        let titles: Vec<_> = listing.lines().collect();
        assert!(titles[0].starts_with("[ ] Write report (Medium)"));
        assert!(titles[1].starts_with("[ ] Buy milk (Medium)"));
        assert!(storage.get(TASKS_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn blank_title_is_reported_without_writing() {
        let storage = MemoryKeyValueStore::new();
        let mut store = TaskListStore::initialize(KvSnapshotRepository::new(storage.clone()));

        let output = execute(&mut store, add("   ")).unwrap();

        assert!(output.contains("nothing added"));
        assert!(storage.is_empty());
    }

    #[test]
    fn edit_without_description_keeps_existing_text() {
        let storage = MemoryKeyValueStore::new();
        let mut store = TaskListStore::initialize(KvSnapshotRepository::new(storage));
        execute(
            &mut store,
            Command::Add {
                title: "Draft".to_string(),
                description: "keep me".to_string(),
                priority: Priority::Low,
            },
        )
        .unwrap();
        let id = store.tasks()[0].id;

        execute(
            &mut store,
            Command::Edit {
                id,
                title: "Final".to_string(),
                description: None,
            },
        )
        .unwrap();

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "Final");
        assert_eq!(task.description, "keep me");
    }

    #[test]
    fn unknown_ids_report_not_found() {
        let mut store =
            TaskListStore::initialize(KvSnapshotRepository::new(MemoryKeyValueStore::new()));
        let id = Uuid::new_v4();

        for command in [
            Command::Delete { id },
            Command::Done { id },
            Command::Edit {
                id,
                title: "x".to_string(),
                description: None,
            },
        ] {
            let output = execute(&mut store, command).unwrap();
            assert_eq!(output, format!("task not found: {id}"));
        }
    }

    #[test]
    fn reset_removes_snapshot() {
        let storage = MemoryKeyValueStore::new();
        let mut store = TaskListStore::initialize(KvSnapshotRepository::new(storage.clone()));
        execute(&mut store, add("Buy milk")).unwrap();

        execute(&mut store, Command::Reset).unwrap();

        assert!(storage.get(TASKS_STORAGE_KEY).unwrap().is_none());
    }

    fn run_args(conn: &rusqlite::Connection, args: &[&str]) -> String {
        let cli =
            Cli::try_parse_from(std::iter::once("tasklist").chain(args.iter().copied())).unwrap();
        run_on_connection(conn, cli.command).unwrap()
    }

    #[test]
    fn migrated_connection_keeps_state_across_commands() {
        let conn = open_db_in_memory().unwrap();

        run_args(&conn, &["add", "Buy milk", "--priority", "low"]);
        run_args(&conn, &["add", "Write report"]);
        let listing = run_args(&conn, &["list"]);

        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[ ] Write report (Medium)"));
        assert!(lines[1].starts_with("[ ] Buy milk (Low)"));
    }

    #[test]
    fn missing_id_on_sqlite_is_reported_as_success() {
        let conn = open_db_in_memory().unwrap();
        let id = Uuid::new_v4().to_string();

        let result = run_on_connection(
            &conn,
            Cli::try_parse_from(["tasklist", "delete", id.as_str()])
                .unwrap()
                .command,
        );

        assert_eq!(result.unwrap(), format!("task not found: {id}"));
    }

    #[test]
    fn unmigrated_connection_is_refused() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();

        assert!(run_on_connection(&conn, Command::List).is_err());
    }

    #[test]
    fn malformed_arguments_exit_with_usage_code() {
        let err = Cli::try_parse_from(["tasklist", "done", "not-a-uuid"]).unwrap_err();

        assert_eq!(err.exit_code(), 2);
    }
}
