//! Time-windowed views over the analytics extract.

use spin_core::stats::{AnalyticsRow, daily_counts, hourly_grid};

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::context::AppContext;
use crate::output::output;

async fn extract(days: Option<u32>, ctx: &AppContext) -> anyhow::Result<Vec<AnalyticsRow>> {
    let days = effective_limit(days, ctx.config.general.analytics_days);
    Ok(ctx.service.get_analytics_data(days).await?)
}

pub async fn analytics(
    days: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut rows = extract(days, ctx).await?;
    apply_limit(&mut rows, flags.limit);
    output(&rows, flags.format)
}

pub async fn timeline(
    days: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rows = extract(days, ctx).await?;
    output(&daily_counts(&rows), flags.format)
}

pub async fn heatmap(
    days: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rows = extract(days, ctx).await?;
    output(&hourly_grid(&rows), flags.format)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[tokio::test]
    async fn extract_uses_configured_window_by_default() {
        let mut ctx = AppContext::in_memory().await;
        ctx.config.general.analytics_days = 7;
        let task = ctx.service.add_task("Read", None, None).await.unwrap();
        let now = Utc::now();
        ctx.service
            .record_spin_at(task.id, None, now - Duration::days(10))
            .await
            .unwrap();
        ctx.service
            .record_spin_at(task.id, None, now - Duration::days(3))
            .await
            .unwrap();

        assert_eq!(extract(None, &ctx).await.unwrap().len(), 1);
        assert_eq!(extract(Some(30), &ctx).await.unwrap().len(), 2);
    }
}
