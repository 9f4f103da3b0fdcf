use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    category: Option<&str>,
    priority: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task = ctx.service.add_task(name, category, priority).await?;
    output(&task, flags.format)
}
