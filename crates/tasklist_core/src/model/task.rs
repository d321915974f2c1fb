//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted in the snapshot.
//! - Define the partial payloads accepted by add/update operations.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is captured once at creation and never rewritten.
//! - `created_at` is written with at least millisecond precision and never
//!   loses sub-millisecond digits in the text snapshot form.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one task.
pub type TaskId = Uuid;

/// Priority label shown next to each task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Stable wire value (`low|medium|high`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a priority wire value, ignoring case and surrounding whitespace.
pub fn parse_priority(value: &str) -> Option<Priority> {
    match value.trim().to_ascii_lowercase().as_str() {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

/// One user-visible to-do entry.
///
/// Serialized field names follow the snapshot wire format (`createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    /// RFC 3339 text on the wire, millisecond precision or finer.
    #[serde(with = "timestamp_text")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Materializes a new record from add input with fresh identity.
    ///
    /// # Invariants
    /// - `id` is a random v4 UUID.
    /// - `created_at` is truncated to milliseconds.
    pub fn create(input: NewTask) -> Self {
        Self::create_at(input, Utc::now())
    }

    /// Same as [`Task::create`] with a caller-provided creation instant.
    pub fn create_at(input: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            priority: input.priority,
            completed: input.completed,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    /// Applies a shallow field overwrite.
    ///
    /// `id` and `created_at` are not part of [`TaskUpdate`] and stay untouched.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
    }
}

/// Add payload: every task field except `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
}

impl NewTask {
    /// Creates add input with default priority `medium` and `completed = false`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Update payload. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Returns whether applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }
}

/// Validation errors raised at the task creation/edit boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Checks that a title has at least one non-whitespace character.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

/// Serde adapter for `createdAt`.
///
/// Millisecond-aligned instants are written as `YYYY-MM-DDTHH:MM:SS.mmmZ`;
/// finer instants keep their micro/nanosecond digits. Any RFC 3339 offset is
/// accepted on read.
mod timestamp_text {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = if value.timestamp_subsec_nanos() % 1_000_000 == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::AutoSi
        };
        serializer.serialize_str(&value.to_rfc3339_opts(format, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(text.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|err| serde::de::Error::custom(format!("invalid createdAt `{text}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_priority, validate_title, NewTask, Priority, Task, TaskUpdate};
    use chrono::{TimeZone, Utc};

    #[test]
    fn create_at_truncates_to_millis() {
        let instant = Utc.timestamp_nanos(1_714_557_600_123_456_789);
        let task = Task::create_at(NewTask::new("x"), instant);
        assert_eq!(task.created_at.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn parse_priority_is_case_insensitive() {
        assert_eq!(parse_priority(" HIGH "), Some(Priority::High));
        assert_eq!(parse_priority("urgent"), None);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(TaskUpdate::default().is_empty());
        assert!(!TaskUpdate::completed(true).is_empty());
    }

    #[test]
    fn validate_title_rejects_whitespace() {
        assert!(validate_title(" \t\n").is_err());
        assert!(validate_title(" a ").is_ok());
    }
}
