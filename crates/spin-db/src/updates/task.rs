//! Task update builder.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub task_name: Option<String>,
    pub category: Option<String>,
    pub priority: Option<i64>,
    pub active: Option<bool>,
}

impl TaskUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.task_name.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.active.is_none()
    }
}

#[derive(Debug, Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn task_name(mut self, task_name: impl Into<String>) -> Self {
        self.0.task_name = Some(task_name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.0.active = Some(active);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_named_fields() {
        let update = TaskUpdateBuilder::new().priority(4).active(false).build();
        assert_eq!(
            update,
            TaskUpdate {
                task_name: None,
                category: None,
                priority: Some(4),
                active: Some(false),
            }
        );
        assert!(!update.is_empty());
    }

    #[test]
    fn default_update_is_empty() {
        assert!(TaskUpdateBuilder::new().build().is_empty());
    }
}
