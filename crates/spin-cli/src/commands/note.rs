use crate::cli::GlobalFlags;
use crate::cli::root_commands::NoteArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `spin note`.
pub async fn run(args: &NoteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spin = ctx
        .service
        .update_spin_notes(args.spin_id, Some(&args.notes))
        .await?;
    output(&spin, flags.format)
}
