mod activity;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StatsCommands;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CompletionRate {
    completion_rate: f64,
}

/// Handle `spin stats`.
pub async fn handle(
    action: &StatsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StatsCommands::Summary => output(&ctx.service.get_summary().await?, flags.format),
        StatsCommands::Frequency => {
            let mut counts = ctx.service.get_task_frequency().await?;
            apply_limit(&mut counts, flags.limit);
            output(&counts, flags.format)
        }
        StatsCommands::Categories => {
            let mut stats = ctx.service.get_category_stats().await?;
            apply_limit(&mut stats, flags.limit);
            output(&stats, flags.format)
        }
        StatsCommands::Completion => {
            let completion_rate = ctx.service.get_completion_rate().await?;
            output(&CompletionRate { completion_rate }, flags.format)
        }
        StatsCommands::Analytics { days } => activity::analytics(*days, ctx, flags).await,
        StatsCommands::Timeline { days } => activity::timeline(*days, ctx, flags).await,
        StatsCommands::Heatmap { days } => activity::heatmap(*days, ctx, flags).await,
    }
}
