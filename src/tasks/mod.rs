// tasks/mod.rs — Task record, wire format, and error type.

pub mod service;
pub mod store;

pub use service::TaskService;
pub use store::TaskStore;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed `dueDate` wire format (`2025-01-01 10:00:00`).
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── Task ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier. `None` until the first save; immutable once set.
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    /// Free text; serialized as `null` when absent.
    pub description: Option<String>,
    /// Free-form status text, e.g. `"PENDING"`, `"IN_PROGRESS"`, `"DONE"`.
    /// No enforced enumeration — any non-empty string is accepted.
    pub status: String,
    #[serde(with = "due_date_format")]
    pub due_date: NaiveDateTime,
}

impl Task {
    /// Build an unsaved task (no id). The store assigns the id on save.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        status: impl Into<String>,
        due_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
            status: status.into(),
            due_date,
        }
    }
}

/// Serde adapter pinning `dueDate` to [`DUE_DATE_FORMAT`].
mod due_date_format {
    use super::DUE_DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DUE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DUE_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

// ─── TaskError ────────────────────────────────────────────────────────────────

/// Errors raised by the task service.
///
/// The REST layer inspects the variant to pick an HTTP status — never the
/// message text. `NotFound` always carries the requested id.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found with id: {0}")]
    NotFound(i64),
}
