//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use tasklist_core::{parse_priority, Priority, TaskId};

/// Task list backed by a local SQLite snapshot.
#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the list, most recent first.
    List,

    /// Add a task to the top of the list.
    Add {
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// low, medium or high (any case).
        #[arg(long, value_parser = parse_level, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// Replace a task's title, and its description when given.
    Edit {
        #[arg(value_parser = parse_id)]
        id: TaskId,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Mark a task completed.
    Done {
        #[arg(value_parser = parse_id)]
        id: TaskId,
    },

    /// Mark a task not completed.
    Undone {
        #[arg(value_parser = parse_id)]
        id: TaskId,
    },

    /// Change a task's priority.
    #[command(name = "priority")]
    SetPriority {
        #[arg(value_parser = parse_id)]
        id: TaskId,

        #[arg(value_parser = parse_level)]
        level: Priority,
    },

    /// Remove a task.
    Delete {
        #[arg(value_parser = parse_id)]
        id: TaskId,
    },

    /// Drop the stored snapshot.
    Reset,

    /// Check the core library linkage.
    Ping,

    /// Print the core library version.
    Version,
}

fn parse_id(raw: &str) -> Result<TaskId, String> {
    TaskId::parse_str(raw.trim()).map_err(|_| format!("invalid task id `{raw}`"))
}

fn parse_level(raw: &str) -> Result<Priority, String> {
    parse_priority(raw).ok_or_else(|| format!("invalid priority `{raw}`; expected low|medium|high"))
}
