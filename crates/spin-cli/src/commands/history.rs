use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `spin history`.
pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.history_limit);
    let history = ctx.service.get_spin_history(limit).await?;
    output(&history, flags.format)
}
