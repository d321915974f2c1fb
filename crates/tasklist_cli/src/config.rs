//! Environment-driven CLI settings.

use std::env;
use std::path::PathBuf;

const DB_FILE_NAME: &str = "tasklist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    /// Logging is enabled only when set.
    pub log_dir: Option<String>,
    pub log_level: String,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank("TASKLIST_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join(DB_FILE_NAME)),
            log_dir: non_blank("TASKLIST_LOG_DIR"),
            log_level: non_blank("TASKLIST_LOG_LEVEL")
                .unwrap_or_else(|| tasklist_core::default_log_level().to_string()),
        }
    }
}
