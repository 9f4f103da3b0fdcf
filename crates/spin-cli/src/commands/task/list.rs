use crate::cli::GlobalFlags;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(all: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut tasks = ctx.service.get_all_tasks(!all).await?;
    apply_limit(&mut tasks, flags.limit);
    output(&tasks, flags.format)
}
