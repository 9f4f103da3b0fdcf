use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Category assigned when a task is created without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Selection weight assigned when a task is created without one.
pub const DEFAULT_PRIORITY: i64 = 1;

/// Lowest priority offered by the CLI. The store itself accepts any integer.
pub const MIN_PRIORITY: i64 = 1;

/// Highest priority offered by the CLI.
pub const MAX_PRIORITY: i64 = 5;

/// A unit of work that can be drawn by a spin.
///
/// Tasks are never hard-deleted; `active = false` hides them from the default
/// listing and from selection while keeping their spin history intact.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    pub category: String,
    pub priority: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Selection weight for this task. Non-positive priorities weigh nothing.
    #[must_use]
    pub fn weight(&self) -> u32 {
        u32::try_from(self.priority.max(0)).unwrap_or(u32::MAX)
    }
}

/// Trim a task name, rejecting names that are empty afterwards.
///
/// # Errors
///
/// Returns `CoreError::Validation` when nothing but whitespace remains.
pub fn normalize_task_name(name: &str) -> Result<&str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("task name must not be empty".into()));
    }
    Ok(trimmed)
}

/// Trim a category, falling back to [`DEFAULT_CATEGORY`] when blank or absent.
#[must_use]
pub fn normalize_category(category: Option<&str>) -> &str {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(priority: i64) -> Task {
        Task {
            id: 1,
            task_name: "Stretch".into(),
            category: DEFAULT_CATEGORY.into(),
            priority,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn weight_follows_priority() {
        assert_eq!(task(5).weight(), 5);
        assert_eq!(task(1).weight(), 1);
    }

    #[test]
    fn non_positive_priority_has_zero_weight() {
        assert_eq!(task(0).weight(), 0);
        assert_eq!(task(-3).weight(), 0);
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(normalize_task_name("  Read  ").unwrap(), "Read");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(
            normalize_task_name(" \t "),
            Err(CoreError::Validation(_))
        ));
        assert!(normalize_task_name("").is_err());
    }

    #[test]
    fn blank_category_falls_back_to_default() {
        assert_eq!(normalize_category(None), DEFAULT_CATEGORY);
        assert_eq!(normalize_category(Some("   ")), DEFAULT_CATEGORY);
        assert_eq!(normalize_category(Some(" Work ")), "Work");
    }

    #[test]
    fn oversized_priority_saturates() {
        assert_eq!(task(i64::MAX).weight(), u32::MAX);
    }
}
