mod add;
mod delete;
mod get;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `spin task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::Add {
            name,
            category,
            priority,
        } => add::run(name, category.as_deref(), *priority, ctx, flags).await,
        TaskCommands::List { all } => list::run(*all, ctx, flags).await,
        TaskCommands::Get { id } => get::run(*id, ctx, flags).await,
        TaskCommands::Update {
            id,
            name,
            category,
            priority,
            active,
        } => {
            update::run(
                update::Params {
                    id: *id,
                    name: name.clone(),
                    category: category.clone(),
                    priority: *priority,
                    active: *active,
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Delete { id } => delete::run(*id, ctx, flags).await,
    }
}
