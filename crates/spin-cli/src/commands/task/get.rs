use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = ctx
        .service
        .get_task_by_id(id)
        .await?
        .with_context(|| format!("task {id} not found"))?;
    output(&task, flags.format)
}
