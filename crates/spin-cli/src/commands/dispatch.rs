use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Spin(args) => commands::spin::run(&args, ctx, flags).await,
        Commands::Complete(args) => commands::complete::run(&args, ctx, flags).await,
        Commands::Note(args) => commands::note::run(&args, ctx, flags).await,
        Commands::History => commands::history::run(ctx, flags).await,
        Commands::Stats { action } => commands::stats::handle(&action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
    }
}
