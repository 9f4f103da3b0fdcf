use chrono::{NaiveDate, Utc};
use spin_core::entities::SpinHistoryEntry;
use spin_core::report::{Report, ReportWindow, build_report};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `spin report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let report = build(action, today, ctx).await?;
    output(&report, flags.format)
}

fn window_for(action: &ReportCommands, today: NaiveDate) -> anyhow::Result<ReportWindow> {
    Ok(match action {
        ReportCommands::Daily => ReportWindow::daily(today),
        ReportCommands::Weekly => ReportWindow::weekly(today),
        ReportCommands::Monthly => ReportWindow::monthly(today),
        ReportCommands::Custom { start, end } => ReportWindow::custom(*start, *end)?,
    })
}

async fn build(
    action: &ReportCommands,
    today: NaiveDate,
    ctx: &AppContext,
) -> anyhow::Result<Report> {
    let window = window_for(action, today)?;
    let fetch = effective_limit(
        ctx.config.general.report_history_limit,
        window.kind.default_history_limit(),
    );
    let history = ctx.service.get_spin_history(fetch).await?;

    if page_may_truncate_window(&window, fetch, &history) {
        tracing::warn!(
            fetch,
            kind = %window.kind,
            "report scanned the newest {fetch} spins only; older spins in the window are not counted"
        );
    }

    Ok(build_report(window, today, &history))
}

/// A full page whose oldest row is still on or after the window start may
/// have cut off older spins from the window.
fn page_may_truncate_window(
    window: &ReportWindow,
    fetch: u32,
    history: &[SpinHistoryEntry],
) -> bool {
    let full = history.len() >= usize::try_from(fetch).unwrap_or(usize::MAX);
    full && history
        .last()
        .is_some_and(|oldest| oldest.spun_at.date_naive() >= window.start)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn windows_follow_the_command() {
        let today = date(2026, 10, 16);
        assert_eq!(
            window_for(&ReportCommands::Weekly, today).unwrap().start,
            date(2026, 10, 12)
        );
        assert_eq!(
            window_for(&ReportCommands::Monthly, today).unwrap().start,
            date(2026, 10, 1)
        );
        assert_eq!(
            window_for(&ReportCommands::Daily, today).unwrap().end,
            today
        );
    }

    #[test]
    fn inverted_custom_range_is_an_error() {
        let action = ReportCommands::Custom {
            start: date(2026, 10, 16),
            end: date(2026, 10, 1),
        };
        let err = window_for(&action, date(2026, 10, 16)).unwrap_err();
        assert!(err.to_string().contains("before start date"));
    }

    #[tokio::test]
    async fn custom_report_counts_spins_inside_the_range() {
        let ctx = AppContext::in_memory().await;
        let task = ctx.service.add_task("Write", Some("Work"), Some(3)).await.unwrap();
        for (day, hour) in [(1, 9), (3, 10), (3, 15), (20, 8)] {
            let at = Utc.with_ymd_and_hms(2026, 9, day, hour, 0, 0).unwrap();
            ctx.service.record_spin_at(task.id, None, at).await.unwrap();
        }

        let action = ReportCommands::Custom {
            start: date(2026, 9, 1),
            end: date(2026, 9, 3),
        };
        let report = build(&action, date(2026, 10, 16), &ctx).await.unwrap();

        assert_eq!(report.total_spins, 3);
        assert_eq!(report.active_days, 2);
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.top_tasks[0].task_name, "Write");
    }

    fn entry(id: i64, at: chrono::DateTime<Utc>) -> SpinHistoryEntry {
        SpinHistoryEntry {
            id,
            task_id: 1,
            spun_at: at,
            completed: false,
            notes: None,
            task_name: "Write".into(),
            category: "Work".into(),
            priority: 1,
        }
    }

    #[test]
    fn full_page_ending_on_window_start_may_truncate() {
        let window = ReportWindow::custom(date(2026, 9, 1), date(2026, 9, 3)).unwrap();
        let history = vec![
            entry(3, Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap()),
            entry(2, Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()),
        ];
        assert!(page_may_truncate_window(&window, 2, &history));
        assert!(!page_may_truncate_window(&window, 3, &history));
    }

    #[test]
    fn full_page_reaching_before_window_is_complete() {
        let window = ReportWindow::custom(date(2026, 9, 1), date(2026, 9, 3)).unwrap();
        let history = vec![
            entry(2, Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()),
            entry(1, Utc.with_ymd_and_hms(2026, 8, 31, 23, 0, 0).unwrap()),
        ];
        assert!(!page_may_truncate_window(&window, 2, &history));
        assert!(!page_may_truncate_window(&window, 2, &[]));
    }

    #[tokio::test]
    async fn empty_window_gives_empty_report() {
        let ctx = AppContext::in_memory().await;
        let report = build(&ReportCommands::Daily, date(2026, 10, 16), &ctx)
            .await
            .unwrap();
        assert!(report.is_empty());
        assert!(report.entries.is_empty());
    }
}
