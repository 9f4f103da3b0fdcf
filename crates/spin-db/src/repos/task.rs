//! Task repository: create, read, partial update, soft delete.

use chrono::Utc;
use tracing::debug;

use spin_core::entities::{DEFAULT_PRIORITY, Task, normalize_category, normalize_task_name};

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_flag, parse_datetime};
use crate::service::SpinService;
use crate::updates::task::TaskUpdate;

const SELECT_COLS: &str = "id, task_name, category, priority, active, created_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        task_name: row.get(1)?,
        category: row.get(2)?,
        priority: row.get(3)?,
        active: get_flag(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl SpinService {
    /// Add an active task. `category` defaults to `"General"` and `priority`
    /// to 1 when not supplied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the name is blank.
    pub async fn add_task(
        &self,
        name: &str,
        category: Option<&str>,
        priority: Option<i64>,
    ) -> Result<Task, DatabaseError> {
        let name = normalize_task_name(name)?;
        let category = normalize_category(category);
        let priority = priority.unwrap_or(DEFAULT_PRIORITY);
        let created_at = format_timestamp(Utc::now());

        let task = self
            .db()
            .with_connection("add_task", |conn| async move {
                let mut rows = conn
                    .query(
                        &format!(
                            "INSERT INTO tasks (task_name, category, priority, active, created_at)
                             VALUES (?1, ?2, ?3, 1, ?4)
                             RETURNING {SELECT_COLS}"
                        ),
                        libsql::params![name, category, priority, created_at],
                    )
                    .await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                row_to_task(&row)
            })
            .await?;

        debug!(task_id = task.id, category = %task.category, "task added");
        Ok(task)
    }

    /// Fetch one task, active or not.
    pub async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        self.db()
            .with_connection("get_task_by_id", |conn| async move {
                let mut rows = conn
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"),
                        [id],
                    )
                    .await?;
                rows.next().await?.map(|row| row_to_task(&row)).transpose()
            })
            .await
    }

    /// List tasks by priority (highest first), then name, then id.
    pub async fn get_all_tasks(&self, active_only: bool) -> Result<Vec<Task>, DatabaseError> {
        let filter = if active_only { "WHERE active = 1" } else { "" };
        self.db()
            .with_connection("get_all_tasks", |conn| async move {
                let mut rows = conn
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM tasks {filter}
                             ORDER BY priority DESC, task_name ASC, id ASC"
                        ),
                        (),
                    )
                    .await?;
                let mut tasks = Vec::new();
                while let Some(row) = rows.next().await? {
                    tasks.push(row_to_task(&row)?);
                }
                Ok(tasks)
            })
            .await
    }

    /// Apply a partial update and return the task as stored afterwards.
    ///
    /// An empty update changes nothing and returns the current task.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id and
    /// `DatabaseError::Validation` if the name is set to a blank string.
    pub async fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Task, DatabaseError> {
        if update.is_empty() {
            return self
                .get_task_by_id(id)
                .await?
                .ok_or(DatabaseError::NotFound { entity: "task", id });
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref task_name) = update.task_name {
            sets.push(format!("task_name = ?{idx}"));
            params.push(normalize_task_name(task_name)?.into());
            idx += 1;
        }
        if let Some(ref category) = update.category {
            sets.push(format!("category = ?{idx}"));
            params.push(normalize_category(Some(category)).into());
            idx += 1;
        }
        if let Some(priority) = update.priority {
            sets.push(format!("priority = ?{idx}"));
            params.push(priority.into());
            idx += 1;
        }
        if let Some(active) = update.active {
            sets.push(format!("active = ?{idx}"));
            params.push(i64::from(active).into());
            idx += 1;
        }

        params.push(id.into());
        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ?{idx} RETURNING {SELECT_COLS}",
            sets.join(", ")
        );

        let task = self
            .db()
            .with_connection("update_task", |conn| async move {
                let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
                match rows.next().await? {
                    Some(row) => row_to_task(&row),
                    None => Err(DatabaseError::NotFound { entity: "task", id }),
                }
            })
            .await?;

        debug!(task_id = id, ?update, "task updated");
        Ok(task)
    }

    /// Soft-delete: mark the task inactive. Its spin history is untouched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id.
    pub async fn delete_task(&self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .with_connection("delete_task", |conn| async move {
                Ok(conn
                    .execute("UPDATE tasks SET active = 0 WHERE id = ?1", [id])
                    .await?)
            })
            .await?;

        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "task", id });
        }
        debug!(task_id = id, "task deactivated");
        Ok(())
    }

    /// Number of active tasks.
    pub async fn get_task_count(&self) -> Result<i64, DatabaseError> {
        self.db()
            .with_connection("get_task_count", |conn| async move {
                let mut rows = conn
                    .query("SELECT COUNT(*) FROM tasks WHERE active = 1", ())
                    .await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                Ok(row.get::<i64>(0)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{seed_task, test_service};
    use crate::updates::task::TaskUpdateBuilder;

    #[tokio::test]
    async fn add_task_applies_defaults() {
        let svc = test_service().await;
        let task = svc.add_task("Read a chapter", None, None).await.unwrap();

        assert!(task.id > 0);
        assert_eq!(task.task_name, "Read a chapter");
        assert_eq!(task.category, "General");
        assert_eq!(task.priority, 1);
        assert!(task.active);

        let fetched = svc.get_task_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(fetched, task);
    }

    #[tokio::test]
    async fn add_task_trims_name() {
        let svc = test_service().await;
        let task = svc.add_task("  Walk  ", Some("Health"), Some(3)).await.unwrap();
        assert_eq!(task.task_name, "Walk");
        assert_eq!(task.category, "Health");
        assert_eq!(task.priority, 3);
    }

    #[tokio::test]
    async fn add_task_rejects_blank_name() {
        let svc = test_service().await;
        let err = svc.add_task("   ", None, None).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert_eq!(svc.get_all_tasks(false).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let svc = test_service().await;
        let a = svc.add_task("A", None, None).await.unwrap();
        let b = svc.add_task("B", None, None).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn get_unknown_task_is_none() {
        let svc = test_service().await;
        assert!(svc.get_task_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_orders_by_priority_then_name() {
        let svc = test_service().await;
        seed_task(&svc, "Bravo", "Work", 2).await;
        seed_task(&svc, "Alpha", "Work", 2).await;
        seed_task(&svc, "Zulu", "Work", 5).await;
        seed_task(&svc, "Mike", "Work", 1).await;

        let names: Vec<String> = svc
            .get_all_tasks(true)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.task_name)
            .collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Bravo", "Mike"]);
    }

    #[tokio::test]
    async fn listing_hides_inactive_unless_asked() {
        let svc = test_service().await;
        let keep = seed_task(&svc, "Keep", "General", 1).await;
        let drop = seed_task(&svc, "Drop", "General", 1).await;
        svc.delete_task(drop.id).await.unwrap();

        let active = svc.get_all_tasks(true).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, keep.id);

        let all = svc.get_all_tasks(false).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|t| t.id == drop.id && !t.active));
    }

    #[tokio::test]
    async fn update_task_partial() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Original", "Work", 2).await;

        let update = TaskUpdateBuilder::new().priority(5).build();
        let updated = svc.update_task(task.id, update).await.unwrap();

        assert_eq!(updated.priority, 5);
        assert_eq!(updated.task_name, "Original");
        assert_eq!(updated.category, "Work");
        assert_eq!(updated.created_at, task.created_at);
    }

    #[tokio::test]
    async fn update_task_every_field() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Old", "Work", 2).await;

        let update = TaskUpdateBuilder::new()
            .task_name("New")
            .category("Home")
            .priority(4)
            .active(false)
            .build();
        let updated = svc.update_task(task.id, update).await.unwrap();

        assert_eq!(updated.task_name, "New");
        assert_eq!(updated.category, "Home");
        assert_eq!(updated.priority, 4);
        assert!(!updated.active);
    }

    #[tokio::test]
    async fn update_task_can_reactivate() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Back", "General", 1).await;
        svc.delete_task(task.id).await.unwrap();

        let update = TaskUpdateBuilder::new().active(true).build();
        assert!(svc.update_task(task.id, update).await.unwrap().active);
        assert_eq!(svc.get_task_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_update_returns_current_task() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Same", "General", 1).await;
        let unchanged = svc
            .update_task(task.id, TaskUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged, task);
    }

    #[tokio::test]
    async fn update_rejects_blank_name() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Named", "General", 1).await;
        let update = TaskUpdateBuilder::new().task_name(" ").build();
        let err = svc.update_task(task.id, update).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));

        let stored = svc.get_task_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.task_name, "Named");
    }

    #[tokio::test]
    async fn update_unknown_task_is_not_found() {
        let svc = test_service().await;
        let update = TaskUpdateBuilder::new().priority(2).build();
        let err = svc.update_task(77, update).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound {
                entity: "task",
                id: 77
            }
        ));

        let err = svc.update_task(77, TaskUpdate::default()).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_unknown_task_is_not_found() {
        let svc = test_service().await;
        let err = svc.delete_task(5).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: "task", id: 5 }));
    }

    #[tokio::test]
    async fn delete_is_idempotent_for_existing_tasks() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Twice", "General", 1).await;
        svc.delete_task(task.id).await.unwrap();
        svc.delete_task(task.id).await.unwrap();
        assert!(!svc.get_task_by_id(task.id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn task_count_tracks_active_tasks() {
        let svc = test_service().await;
        assert_eq!(svc.get_task_count().await.unwrap(), 0);
        let a = seed_task(&svc, "A", "General", 1).await;
        seed_task(&svc, "B", "General", 1).await;
        assert_eq!(svc.get_task_count().await.unwrap(), 2);
        svc.delete_task(a.id).await.unwrap();
        assert_eq!(svc.get_task_count().await.unwrap(), 1);
    }
}
