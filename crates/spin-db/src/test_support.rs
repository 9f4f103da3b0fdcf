//! Shared test utilities for spin-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{DateTime, Utc};
    use spin_core::entities::{SpinRecord, Task};

    use crate::service::SpinService;

    /// Create an in-memory `SpinService`.
    pub async fn test_service() -> SpinService {
        SpinService::new_local(":memory:").await.unwrap()
    }

    /// Add a task with an explicit category and priority.
    pub async fn seed_task(svc: &SpinService, name: &str, category: &str, priority: i64) -> Task {
        svc.add_task(name, Some(category), Some(priority)).await.unwrap()
    }

    /// Record a spin at a fixed instant.
    pub async fn seed_spin_at(svc: &SpinService, task_id: i64, at: DateTime<Utc>) -> SpinRecord {
        svc.record_spin_at(task_id, None, at).await.unwrap()
    }
}
