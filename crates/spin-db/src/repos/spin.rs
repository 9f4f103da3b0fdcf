//! Spin history repository: record spins, complete them, annotate them.
//!
//! A spin always references an existing task. The reference is checked by
//! the INSERT itself (`INSERT … SELECT … FROM tasks WHERE id = ?`), so the
//! check and the write cannot interleave with another writer, and the same
//! statement works on backends that do not enforce foreign keys.

use chrono::{DateTime, Utc};
use tracing::debug;

use spin_core::entities::{SpinHistoryEntry, SpinRecord};

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_flag, get_opt_string, normalize_notes, parse_datetime};
use crate::service::SpinService;

const SPIN_COLS: &str = "id, task_id, spun_at, completed, notes";

/// Spin columns joined with the task columns as they are at query time.
pub(crate) const HISTORY_SELECT: &str = "SELECT sh.id, sh.task_id, sh.spun_at, sh.completed, sh.notes,
        t.task_name, t.category, t.priority
 FROM spin_history sh
 JOIN tasks t ON sh.task_id = t.id";

fn row_to_spin(row: &libsql::Row) -> Result<SpinRecord, DatabaseError> {
    Ok(SpinRecord {
        id: row.get(0)?,
        task_id: row.get(1)?,
        spun_at: parse_datetime(&row.get::<String>(2)?)?,
        completed: get_flag(row, 3)?,
        notes: get_opt_string(row, 4)?,
    })
}

pub(crate) fn row_to_history_entry(row: &libsql::Row) -> Result<SpinHistoryEntry, DatabaseError> {
    Ok(SpinHistoryEntry {
        id: row.get(0)?,
        task_id: row.get(1)?,
        spun_at: parse_datetime(&row.get::<String>(2)?)?,
        completed: get_flag(row, 3)?,
        notes: get_opt_string(row, 4)?,
        task_name: row.get(5)?,
        category: row.get(6)?,
        priority: row.get(7)?,
    })
}

impl SpinService {
    /// Record that `task_id` was drawn just now.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Integrity` if the task does not exist. Nothing
    /// is written in that case.
    pub async fn record_spin(
        &self,
        task_id: i64,
        notes: Option<&str>,
    ) -> Result<SpinRecord, DatabaseError> {
        self.record_spin_at(task_id, notes, Utc::now()).await
    }

    /// Record a spin with an explicit timestamp.
    ///
    /// Inactive tasks are accepted; only a missing task is rejected.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Integrity` if the task does not exist.
    pub async fn record_spin_at(
        &self,
        task_id: i64,
        notes: Option<&str>,
        spun_at: DateTime<Utc>,
    ) -> Result<SpinRecord, DatabaseError> {
        let notes = normalize_notes(notes);
        let spun_at = format_timestamp(spun_at);

        let spin = self
            .db()
            .with_connection("record_spin", |conn| async move {
                let mut rows = conn
                    .query(
                        &format!(
                            "INSERT INTO spin_history (task_id, spun_at, completed, notes)
                             SELECT id, ?2, 0, ?3 FROM tasks WHERE id = ?1
                             RETURNING {SPIN_COLS}"
                        ),
                        libsql::params![task_id, spun_at, notes],
                    )
                    .await?;
                match rows.next().await? {
                    Some(row) => row_to_spin(&row),
                    None => Err(DatabaseError::Integrity(format!(
                        "cannot record a spin for task {task_id}: no such task"
                    ))),
                }
            })
            .await?;

        debug!(spin_id = spin.id, task_id, "spin recorded");
        Ok(spin)
    }

    /// Set or clear the completed flag. Repeating the same value is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown spin id.
    pub async fn mark_spin_completed(
        &self,
        spin_id: i64,
        completed: bool,
    ) -> Result<SpinRecord, DatabaseError> {
        let spin = self
            .update_spin(
                "mark_spin_completed",
                spin_id,
                "completed = ?2",
                vec![spin_id.into(), i64::from(completed).into()],
            )
            .await?;
        debug!(spin_id, completed, "spin completion set");
        Ok(spin)
    }

    /// Mark a spin completed and, when `notes` is given, replace its notes in
    /// the same statement. Without notes the existing ones are kept.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown spin id.
    pub async fn complete_spin(
        &self,
        spin_id: i64,
        notes: Option<&str>,
    ) -> Result<SpinRecord, DatabaseError> {
        let notes = normalize_notes(notes).map_or(libsql::Value::Null, Into::into);
        let spin = self
            .update_spin(
                "complete_spin",
                spin_id,
                "completed = 1, notes = COALESCE(?2, notes)",
                vec![spin_id.into(), notes],
            )
            .await?;
        debug!(spin_id, "spin completed");
        Ok(spin)
    }

    /// Overwrite a spin's notes. Blank notes clear them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown spin id.
    pub async fn update_spin_notes(
        &self,
        spin_id: i64,
        notes: Option<&str>,
    ) -> Result<SpinRecord, DatabaseError> {
        let notes = normalize_notes(notes).map_or(libsql::Value::Null, Into::into);
        let spin = self
            .update_spin(
                "update_spin_notes",
                spin_id,
                "notes = ?2",
                vec![spin_id.into(), notes],
            )
            .await?;
        debug!(spin_id, "spin notes updated");
        Ok(spin)
    }

    /// One spin joined with its task.
    pub async fn get_spin(&self, spin_id: i64) -> Result<Option<SpinHistoryEntry>, DatabaseError> {
        self.db()
            .with_connection("get_spin", |conn| async move {
                let mut rows = conn
                    .query(&format!("{HISTORY_SELECT} WHERE sh.id = ?1"), [spin_id])
                    .await?;
                rows.next()
                    .await?
                    .map(|row| row_to_history_entry(&row))
                    .transpose()
            })
            .await
    }

    /// The most recent `limit` spins, newest first, joined with their tasks.
    ///
    /// Spins of inactive tasks are included.
    pub async fn get_spin_history(
        &self,
        limit: u32,
    ) -> Result<Vec<SpinHistoryEntry>, DatabaseError> {
        self.db()
            .with_connection("get_spin_history", |conn| async move {
                let mut rows = conn
                    .query(
                        &format!("{HISTORY_SELECT} ORDER BY sh.spun_at DESC, sh.id DESC LIMIT ?1"),
                        [i64::from(limit)],
                    )
                    .await?;
                let mut entries = Vec::new();
                while let Some(row) = rows.next().await? {
                    entries.push(row_to_history_entry(&row)?);
                }
                Ok(entries)
            })
            .await
    }

    /// Total number of recorded spins.
    pub async fn get_spin_count(&self) -> Result<i64, DatabaseError> {
        self.db()
            .with_connection("get_spin_count", |conn| async move {
                let mut rows = conn.query("SELECT COUNT(*) FROM spin_history", ()).await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                Ok(row.get::<i64>(0)?)
            })
            .await
    }

    /// Run `UPDATE spin_history SET {set} WHERE id = ?1 RETURNING …`.
    ///
    /// `?1` is always the spin id; `set` may use `?2` onwards.
    async fn update_spin(
        &self,
        op: &'static str,
        spin_id: i64,
        set: &str,
        params: Vec<libsql::Value>,
    ) -> Result<SpinRecord, DatabaseError> {
        let sql = format!("UPDATE spin_history SET {set} WHERE id = ?1 RETURNING {SPIN_COLS}");
        self.db()
            .with_connection(op, |conn| async move {
                let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
                match rows.next().await? {
                    Some(row) => row_to_spin(&row),
                    None => Err(DatabaseError::NotFound {
                        entity: "spin",
                        id: spin_id,
                    }),
                }
            })
            .await
    }
}
