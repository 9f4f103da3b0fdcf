//! Aggregate statistics over tasks and spin history. All queries are reads.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use spin_core::stats::{
    AnalyticsRow, CategoryStat, StoreSummary, TaskFrequency, completion_percentage,
};

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_flag, parse_datetime};
use crate::service::SpinService;

fn row_to_analytics(row: &libsql::Row) -> Result<AnalyticsRow, DatabaseError> {
    let spun_at = parse_datetime(&row.get::<String>(1)?)?;
    Ok(AnalyticsRow {
        spin_id: row.get(0)?,
        spun_at,
        completed: get_flag(row, 2)?,
        task_name: row.get(3)?,
        category: row.get(4)?,
        priority: row.get(5)?,
        spin_date: spun_at.date_naive(),
    })
}

/// 0001-01-01T00:00:00Z, the earliest instant stored timestamps can render.
const EARLIEST_CUTOFF_SECS: i64 = -62_135_596_800;

fn analytics_cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    let earliest =
        DateTime::from_timestamp(EARLIEST_CUTOFF_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC);
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .map_or(earliest, |cutoff| cutoff.max(earliest))
}

impl SpinService {
    /// Spin counts per active task, including tasks never drawn.
    ///
    /// Ordered by count (highest first), then name, then id.
    pub async fn get_task_frequency(&self) -> Result<Vec<TaskFrequency>, DatabaseError> {
        self.db()
            .with_connection("get_task_frequency", |conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT t.id, t.task_name, COUNT(sh.id) AS spin_count
                         FROM tasks t
                         LEFT JOIN spin_history sh ON t.id = sh.task_id
                         WHERE t.active = 1
                         GROUP BY t.id, t.task_name
                         ORDER BY spin_count DESC, t.task_name ASC, t.id ASC",
                        (),
                    )
                    .await?;
                let mut counts = Vec::new();
                while let Some(row) = rows.next().await? {
                    counts.push(TaskFrequency {
                        task_id: row.get(0)?,
                        task_name: row.get(1)?,
                        spin_count: row.get(2)?,
                    });
                }
                Ok(counts)
            })
            .await
    }

    /// Percentage of all spins that were completed; `0.0` with no spins.
    ///
    /// Both counts come from one statement, so they describe the same state.
    pub async fn get_completion_rate(&self) -> Result<f64, DatabaseError> {
        let (total, completed) = self
            .db()
            .with_connection("get_completion_rate", |conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM spin_history",
                        (),
                    )
                    .await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                Ok((row.get::<i64>(0)?, row.get::<i64>(1)?))
            })
            .await?;
        Ok(completion_percentage(completed, total))
    }

    /// Spin totals per category of active tasks, busiest category first.
    ///
    /// Categories whose tasks were never drawn appear with zero totals.
    pub async fn get_category_stats(&self) -> Result<Vec<CategoryStat>, DatabaseError> {
        self.db()
            .with_connection("get_category_stats", |conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT t.category,
                                COUNT(sh.id) AS total_spins,
                                COALESCE(SUM(sh.completed), 0) AS completed_spins
                         FROM tasks t
                         LEFT JOIN spin_history sh ON t.id = sh.task_id
                         WHERE t.active = 1
                         GROUP BY t.category
                         ORDER BY total_spins DESC, t.category ASC",
                        (),
                    )
                    .await?;
                let mut stats = Vec::new();
                while let Some(row) = rows.next().await? {
                    stats.push(CategoryStat {
                        category: row.get(0)?,
                        total: row.get(1)?,
                        completed: row.get(2)?,
                    });
                }
                Ok(stats)
            })
            .await
    }

    /// Spins from the last `days` days, oldest first.
    ///
    /// A window reaching back before year 1 covers every spin.
    pub async fn get_analytics_data(&self, days: u32) -> Result<Vec<AnalyticsRow>, DatabaseError> {
        self.get_analytics_since(analytics_cutoff(Utc::now(), days))
            .await
    }

    /// Spins at or after `cutoff`, oldest first. Inactive tasks' spins are
    /// included.
    pub async fn get_analytics_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<AnalyticsRow>, DatabaseError> {
        let bound = format_timestamp(cutoff);
        let extract = self
            .db()
            .with_connection("get_analytics_since", |conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT sh.id, sh.spun_at, sh.completed, t.task_name, t.category, t.priority
                         FROM spin_history sh
                         JOIN tasks t ON sh.task_id = t.id
                         WHERE sh.spun_at >= ?1
                         ORDER BY sh.spun_at ASC, sh.id ASC",
                        [bound],
                    )
                    .await?;
                let mut extract = Vec::new();
                while let Some(row) = rows.next().await? {
                    extract.push(row_to_analytics(&row)?);
                }
                Ok(extract)
            })
            .await?;

        debug!(rows = extract.len(), %cutoff, "analytics extracted");
        Ok(extract)
    }

    /// Headline numbers: total spins, active tasks, completion rate, and the
    /// most drawn active task (if any active task was drawn at all).
    pub async fn get_summary(&self) -> Result<StoreSummary, DatabaseError> {
        let total_spins = self.get_spin_count().await?;
        let active_tasks = self.get_task_count().await?;
        let completion_rate = self.get_completion_rate().await?;
        let most_spun = self
            .get_task_frequency()
            .await?
            .into_iter()
            .find(|f| f.spin_count > 0)
            .map(|f| f.task_name);

        Ok(StoreSummary {
            total_spins,
            active_tasks,
            completion_rate,
            most_spun,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{seed_spin_at, seed_task, test_service};

    #[tokio::test]
    async fn frequency_includes_unspun_active_tasks() {
        let svc = test_service().await;
        let a = seed_task(&svc, "A", "Work", 1).await;
        let b = seed_task(&svc, "B", "Work", 1).await;
        let c = seed_task(&svc, "C", "Work", 1).await;
        for _ in 0..2 {
            svc.record_spin(b.id, None).await.unwrap();
        }
        svc.record_spin(c.id, None).await.unwrap();

        let freq = svc.get_task_frequency().await.unwrap();
        let pairs: Vec<(i64, i64)> = freq.iter().map(|f| (f.task_id, f.spin_count)).collect();
        assert_eq!(pairs, vec![(b.id, 2), (c.id, 1), (a.id, 0)]);
    }

    #[tokio::test]
    async fn frequency_skips_inactive_tasks() {
        let svc = test_service().await;
        let gone = seed_task(&svc, "Gone", "Work", 1).await;
        seed_task(&svc, "Here", "Work", 1).await;
        svc.record_spin(gone.id, None).await.unwrap();
        svc.delete_task(gone.id).await.unwrap();

        let freq = svc.get_task_frequency().await.unwrap();
        assert_eq!(freq.len(), 1);
        assert_eq!(freq[0].task_name, "Here");
    }

    #[tokio::test]
    async fn completion_rate_is_zero_without_spins() {
        let svc = test_service().await;
        assert!(svc.get_completion_rate().await.unwrap().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn completion_rate_counts_all_spins() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Read", "Learning", 2).await;
        let mut ids = Vec::new();
        for _ in 0..4 {
            ids.push(svc.record_spin(task.id, None).await.unwrap().id);
        }
        svc.mark_spin_completed(ids[0], true).await.unwrap();

        let rate = svc.get_completion_rate().await.unwrap();
        assert!((rate - 25.0).abs() < 1e-9, "rate was {rate}");
    }

    #[tokio::test]
    async fn category_stats_report_zero_for_idle_categories() {
        let svc = test_service().await;
        let work = seed_task(&svc, "Email", "Work", 2).await;
        seed_task(&svc, "Yoga", "Health", 2).await;
        let spin = svc.record_spin(work.id, None).await.unwrap();
        svc.record_spin(work.id, None).await.unwrap();
        svc.mark_spin_completed(spin.id, true).await.unwrap();

        let stats = svc.get_category_stats().await.unwrap();
        assert_eq!(
            stats,
            vec![
                CategoryStat {
                    category: "Work".into(),
                    total: 2,
                    completed: 1,
                },
                CategoryStat {
                    category: "Health".into(),
                    total: 0,
                    completed: 0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn category_ties_break_on_name() {
        let svc = test_service().await;
        seed_task(&svc, "x", "Zeta", 1).await;
        seed_task(&svc, "y", "Alpha", 1).await;

        let names: Vec<String> = svc
            .get_category_stats()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn analytics_cutoff_is_inclusive() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Plan", "Work", 3).await;
        let cutoff = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();

        seed_spin_at(&svc, task.id, cutoff - Duration::microseconds(1)).await;
        let at_cutoff = seed_spin_at(&svc, task.id, cutoff).await;
        let after = seed_spin_at(&svc, task.id, cutoff + Duration::hours(3)).await;

        let rows = svc.get_analytics_since(cutoff).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.spin_id).collect();
        assert_eq!(ids, vec![at_cutoff.id, after.id]);
        assert_eq!(rows[0].spin_date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(rows[0].task_name, "Plan");
        assert_eq!(rows[0].priority, 3);
    }

    #[tokio::test]
    async fn analytics_window_uses_days() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Plan", "Work", 3).await;
        let now = Utc::now();
        seed_spin_at(&svc, task.id, now - Duration::days(40)).await;
        let recent = seed_spin_at(&svc, task.id, now - Duration::days(2)).await;

        let rows = svc.get_analytics_data(30).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spin_id, recent.id);
        assert_eq!(rows[0].spin_date, recent.spun_at.date_naive());
    }

    #[test]
    fn cutoff_clamps_to_earliest_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        assert_eq!(
            analytics_cutoff(now, 30),
            Utc.with_ymd_and_hms(2026, 9, 16, 9, 0, 0).unwrap()
        );
        let earliest = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(analytics_cutoff(now, 1_000_000), earliest);
        assert_eq!(analytics_cutoff(now, 100_000_000), earliest);
        assert_eq!(analytics_cutoff(now, u32::MAX), earliest);
    }

    #[tokio::test]
    async fn analytics_window_past_calendar_range_returns_everything() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Ancient", "Work", 1).await;
        let old_at = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap();
        let old = seed_spin_at(&svc, task.id, old_at).await;
        let recent = svc.record_spin(task.id, None).await.unwrap();

        let ids: Vec<i64> = svc
            .get_analytics_data(100_000_000)
            .await
            .unwrap()
            .iter()
            .map(|r| r.spin_id)
            .collect();
        assert_eq!(ids, vec![old.id, recent.id]);
    }

    #[tokio::test]
    async fn analytics_keeps_inactive_tasks_history() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Retired", "Work", 1).await;
        svc.record_spin(task.id, None).await.unwrap();
        svc.delete_task(task.id).await.unwrap();
        assert_eq!(svc.get_analytics_data(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn summary_of_empty_store() {
        let svc = test_service().await;
        let summary = svc.get_summary().await.unwrap();
        assert_eq!(summary.total_spins, 0);
        assert_eq!(summary.active_tasks, 0);
        assert_eq!(summary.most_spun, None);
    }

    #[tokio::test]
    async fn summary_names_most_spun_task() {
        let svc = test_service().await;
        let a = seed_task(&svc, "Often", "Work", 1).await;
        let b = seed_task(&svc, "Rarely", "Work", 1).await;
        svc.record_spin(a.id, None).await.unwrap();
        svc.record_spin(a.id, None).await.unwrap();
        let done = svc.record_spin(b.id, None).await.unwrap();
        svc.mark_spin_completed(done.id, true).await.unwrap();

        let summary = svc.get_summary().await.unwrap();
        assert_eq!(summary.total_spins, 3);
        assert_eq!(summary.active_tasks, 2);
        assert_eq!(summary.most_spun.as_deref(), Some("Often"));
        assert!((summary.completion_rate - 100.0 / 3.0).abs() < 1e-9);
    }
}
