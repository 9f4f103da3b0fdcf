use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use spin_core::entities::{SpinRecord, Task};
use spin_core::selection::select_weighted;
use spin_db::service::SpinService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SpinArgs;
use crate::context::AppContext;
use crate::output::output;

/// The drawn task and the spin recorded for it.
#[derive(Debug, Serialize)]
pub struct SpinOutcome {
    pub task: Task,
    pub spin: SpinRecord,
}

/// Handle `spin spin`.
pub async fn run(args: &SpinArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let outcome = spin_once(&ctx.service, args.notes.as_deref(), &mut rng).await?;
    output(&outcome, flags.format)
}

/// Draw one active task by priority weight and record the spin.
pub async fn spin_once(
    service: &SpinService,
    notes: Option<&str>,
    rng: &mut StdRng,
) -> anyhow::Result<SpinOutcome> {
    let tasks = service.get_all_tasks(true).await?;
    let task = select_weighted(&tasks, rng)
        .cloned()
        .context("nothing to spin: add an active task with a priority of at least 1")?;

    let spin = service.record_spin(task.id, notes).await?;
    tracing::info!(task_id = task.id, spin_id = spin.id, "task drawn");
    Ok(SpinOutcome { task, spin })
}
