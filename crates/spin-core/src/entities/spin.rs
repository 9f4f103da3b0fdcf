use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One historical instance of a task being selected.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpinRecord {
    pub id: i64,
    pub task_id: i64,
    pub spun_at: DateTime<Utc>,
    pub completed: bool,
    pub notes: Option<String>,
}

/// A spin record joined with its task's current name, category and priority.
///
/// The task fields are read at query time, so renaming a task changes how its
/// past spins are reported.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpinHistoryEntry {
    pub id: i64,
    pub task_id: i64,
    pub spun_at: DateTime<Utc>,
    pub completed: bool,
    pub notes: Option<String>,
    pub task_name: String,
    pub category: String,
    pub priority: i64,
}

impl SpinHistoryEntry {
    /// The bare spin record, without the joined task columns.
    #[must_use]
    pub fn record(&self) -> SpinRecord {
        SpinRecord {
            id: self.id,
            task_id: self.task_id,
            spun_at: self.spun_at,
            completed: self.completed,
            notes: self.notes.clone(),
        }
    }
}
