use clap::{Args, Subcommand};

use crate::cli::subcommands::{ReportCommands, StatsCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Manage the task list.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Draw an active task at random, weighted by priority, and record it.
    Spin(SpinArgs),
    /// Mark a spin completed (or undo it).
    Complete(CompleteArgs),
    /// Replace the notes on a spin.
    Note(NoteArgs),
    /// Show the most recent spins (capped by --limit).
    History,
    /// Aggregate statistics.
    Stats {
        #[command(subcommand)]
        action: StatsCommands,
    },
    /// Daily, weekly, monthly, or custom-range reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SpinArgs {
    /// Notes stored with the spin.
    #[arg(long)]
    pub notes: Option<String>,
    /// Seed the draw for a reproducible pick.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct CompleteArgs {
    pub spin_id: i64,
    /// Replace the spin's notes while completing it.
    #[arg(long)]
    pub notes: Option<String>,
    /// Clear the completed flag instead.
    #[arg(long, conflicts_with = "notes")]
    pub undo: bool,
}

#[derive(Clone, Debug, Args)]
pub struct NoteArgs {
    pub spin_id: i64,
    /// New notes; an empty string clears them.
    pub notes: String,
}
