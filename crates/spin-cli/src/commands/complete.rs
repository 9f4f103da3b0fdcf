use crate::cli::GlobalFlags;
use crate::cli::root_commands::CompleteArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `spin complete`.
pub async fn run(args: &CompleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spin = if args.undo {
        ctx.service.mark_spin_completed(args.spin_id, false).await?
    } else {
        ctx.service
            .complete_spin(args.spin_id, args.notes.as_deref())
            .await?
    };
    output(&spin, flags.format)
}
