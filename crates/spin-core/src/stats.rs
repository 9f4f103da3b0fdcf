//! Aggregate value types returned by the store's statistics queries, plus the
//! daily and hourly rollups derived from an analytics extract.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of spins recorded for one active task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskFrequency {
    pub task_id: i64,
    pub task_name: String,
    pub spin_count: i64,
}

/// Spin totals for one category of active tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryStat {
    pub category: String,
    pub total: i64,
    pub completed: i64,
}

/// One row of the time-windowed analytics extract.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalyticsRow {
    pub spin_id: i64,
    pub spun_at: DateTime<Utc>,
    pub completed: bool,
    pub task_name: String,
    pub category: String,
    pub priority: i64,
    pub spin_date: NaiveDate,
}

/// Spins per calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Spins per (calendar day, hour of day) cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HourlyCount {
    pub date: NaiveDate,
    pub hour: u32,
    pub count: u32,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StoreSummary {
    pub total_spins: i64,
    pub active_tasks: i64,
    pub completion_rate: f64,
    pub most_spun: Option<String>,
}

/// Percentage of `completed` over `total`, `0.0` when nothing was recorded.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completion_percentage(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Group an analytics extract into per-day spin counts, ordered by date.
///
/// Days with no spins are omitted.
#[must_use]
pub fn daily_counts(rows: &[AnalyticsRow]) -> Vec<DailyCount> {
    let mut by_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for row in rows {
        *by_day.entry(row.spin_date).or_default() += 1;
    }
    by_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Pivot an analytics extract into (date, hour) activity cells, ordered by
/// date then hour. Only non-empty cells are returned.
#[must_use]
pub fn hourly_grid(rows: &[AnalyticsRow]) -> Vec<HourlyCount> {
    let mut cells: BTreeMap<(NaiveDate, u32), u32> = BTreeMap::new();
    for row in rows {
        *cells.entry((row.spin_date, row.spun_at.hour())).or_default() += 1;
    }
    cells
        .into_iter()
        .map(|((date, hour), count)| HourlyCount { date, hour, count })
        .collect()
}
