use spin_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub id: i64,
    pub name: Option<String>,
    pub category: Option<String>,
    pub priority: Option<i64>,
    pub active: Option<bool>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;

    let mut builder = TaskUpdateBuilder::new();
    if let Some(name) = params.name {
        builder = builder.task_name(name);
    }
    if let Some(category) = params.category {
        builder = builder.category(category);
    }
    if let Some(priority) = params.priority {
        builder = builder.priority(priority);
    }
    if let Some(active) = params.active {
        builder = builder.active(active);
    }

    let task = ctx.service.update_task(params.id, builder.build()).await?;
    output(&task, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.name.is_none()
        && params.category.is_none()
        && params.priority.is_none()
        && params.active.is_none()
    {
        anyhow::bail!("At least one of --name, --category, --priority, or --active must be provided");
    }
    Ok(())
}
