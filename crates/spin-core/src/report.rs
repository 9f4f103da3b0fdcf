//! Report windows and the rollups a report is built from.
//!
//! Reports are computed client-side from a bounded spin-history snapshot: the
//! caller fetches `ReportKind::default_history_limit` rows, and
//! [`build_report`] keeps the entries whose `spun_at` date falls inside the
//! window. All dates are UTC calendar dates.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::SpinHistoryEntry;
use crate::errors::CoreError;
use crate::stats::completion_percentage;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl ReportKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }

    /// How many history rows to fetch before filtering to the window.
    #[must_use]
    pub const fn default_history_limit(self) -> u32 {
        match self {
            Self::Daily | Self::Weekly => 1_000,
            Self::Monthly | Self::Custom => 10_000,
        }
    }

    /// How many entries the "top tasks" section keeps, `None` for all.
    #[must_use]
    pub const fn top_task_limit(self) -> Option<usize> {
        match self {
            Self::Weekly => Some(5),
            Self::Monthly => Some(10),
            Self::Daily | Self::Custom => None,
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive range of calendar dates a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportWindow {
    pub kind: ReportKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    #[must_use]
    pub const fn daily(today: NaiveDate) -> Self {
        Self {
            kind: ReportKind::Daily,
            start: today,
            end: today,
        }
    }

    /// Monday of the current week through the following Sunday.
    #[must_use]
    pub fn weekly(today: NaiveDate) -> Self {
        let start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        Self {
            kind: ReportKind::Weekly,
            start,
            end: start + Duration::days(6),
        }
    }

    /// First of the month through today.
    #[must_use]
    pub fn monthly(today: NaiveDate) -> Self {
        Self {
            kind: ReportKind::Monthly,
            start: today - Duration::days(i64::from(today.day0())),
            end: today,
        }
    }

    /// An arbitrary inclusive range.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `end` is before `start`.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::Validation(format!(
                "report end date {end} is before start date {start}"
            )));
        }
        Ok(Self {
            kind: ReportKind::Custom,
            start,
            end,
        })
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Days from the window start up to `today` (or the window end, whichever
    /// comes first), inclusive. Zero if the window starts after `today`.
    #[must_use]
    pub fn elapsed_days(&self, today: NaiveDate) -> u32 {
        let last = self.end.min(today);
        if last < self.start {
            return 0;
        }
        u32::try_from((last - self.start).num_days() + 1).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskCount {
    pub task_name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: u32,
    pub completed: u32,
    /// Share of the window's spins, in percent.
    pub share: f64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WeekdayCount {
    pub weekday: String,
    pub count: u32,
}

/// Spins in the `week`-th seven-day block of the month (days 1–7 are week 1).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WeekBucket {
    pub week: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Report {
    pub window: ReportWindow,
    pub total_spins: u32,
    pub completed: u32,
    pub completion_rate: f64,
    pub active_days: u32,
    pub elapsed_days: u32,
    pub average_per_active_day: f64,
    pub top_tasks: Vec<TaskCount>,
    pub categories: Vec<CategoryShare>,
    /// Monday..Sunday counts; weekly reports only.
    pub weekday_activity: Vec<WeekdayCount>,
    /// Week-of-month buckets that saw activity; monthly reports only.
    pub week_of_month: Vec<WeekBucket>,
    /// The individual spins, in history order; daily and custom reports only.
    pub entries: Vec<SpinHistoryEntry>,
}

impl Report {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_spins == 0
    }
}

/// Build a report for `window` from a history snapshot.
///
/// `history` is expected in store order (`spun_at` descending); entries
/// outside the window are ignored.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_report(window: ReportWindow, today: NaiveDate, history: &[SpinHistoryEntry]) -> Report {
    let in_window: Vec<&SpinHistoryEntry> = history
        .iter()
        .filter(|entry| window.contains(entry.spun_at.date_naive()))
        .collect();

    let total_spins = count_u32(in_window.len());
    let completed = count_u32(in_window.iter().filter(|entry| entry.completed).count());

    let mut days: Vec<NaiveDate> = in_window.iter().map(|e| e.spun_at.date_naive()).collect();
    days.sort_unstable();
    days.dedup();
    let active_days = count_u32(days.len());
    let average_per_active_day = if active_days == 0 {
        0.0
    } else {
        f64::from(total_spins) / f64::from(active_days)
    };

    let kind = window.kind;
    let mut top_tasks = tally_tasks(&in_window);
    if let Some(limit) = kind.top_task_limit() {
        top_tasks.truncate(limit);
    }

    Report {
        window,
        total_spins,
        completed,
        completion_rate: completion_percentage(i64::from(completed), i64::from(total_spins)),
        active_days,
        elapsed_days: window.elapsed_days(today),
        average_per_active_day,
        top_tasks,
        categories: tally_categories(&in_window, total_spins),
        weekday_activity: if kind == ReportKind::Weekly {
            tally_weekdays(&in_window)
        } else {
            Vec::new()
        },
        week_of_month: if kind == ReportKind::Monthly {
            tally_weeks_of_month(&in_window)
        } else {
            Vec::new()
        },
        entries: if matches!(kind, ReportKind::Daily | ReportKind::Custom) {
            in_window.into_iter().cloned().collect()
        } else {
            Vec::new()
        },
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn tally_tasks(entries: &[&SpinHistoryEntry]) -> Vec<TaskCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.task_name.as_str()).or_default() += 1;
    }
    let mut tasks: Vec<TaskCount> = counts
        .into_iter()
        .map(|(task_name, count)| TaskCount {
            task_name: task_name.to_string(),
            count,
        })
        .collect();
    tasks.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.task_name.cmp(&b.task_name)));
    tasks
}

fn tally_categories(entries: &[&SpinHistoryEntry], total_spins: u32) -> Vec<CategoryShare> {
    let mut stats: HashMap<&str, (u32, u32)> = HashMap::new();
    for entry in entries {
        let slot = stats.entry(entry.category.as_str()).or_default();
        slot.0 += 1;
        if entry.completed {
            slot.1 += 1;
        }
    }
    let mut categories: Vec<CategoryShare> = stats
        .into_iter()
        .map(|(category, (total, completed))| CategoryShare {
            category: category.to_string(),
            total,
            completed,
            share: completion_percentage(i64::from(total), i64::from(total_spins)),
            completion_rate: completion_percentage(i64::from(completed), i64::from(total)),
        })
        .collect();
    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    categories
}

fn tally_weekdays(entries: &[&SpinHistoryEntry]) -> Vec<WeekdayCount> {
    let mut counts = [0u32; 7];
    for entry in entries {
        counts[entry.spun_at.weekday().num_days_from_monday() as usize] += 1;
    }
    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(weekday, count)| WeekdayCount {
            weekday: (*weekday).to_string(),
            count,
        })
        .collect()
}

fn tally_weeks_of_month(entries: &[&SpinHistoryEntry]) -> Vec<WeekBucket> {
    let mut counts = [0u32; 5];
    for entry in entries {
        counts[entry.spun_at.day0() as usize / 7] += 1;
    }
    (1u32..)
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(week, count)| WeekBucket { week, count })
        .collect()
}
