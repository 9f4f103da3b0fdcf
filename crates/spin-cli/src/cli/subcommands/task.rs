use clap::Subcommand;
use spin_core::entities::{MAX_PRIORITY, MIN_PRIORITY};

/// Task list commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Add a task.
    Add {
        name: String,
        /// Defaults to "General".
        #[arg(long)]
        category: Option<String>,
        /// Selection weight, 1 (rare) to 5 (frequent). Defaults to 1.
        #[arg(long, value_parser = clap::value_parser!(i64).range(MIN_PRIORITY..=MAX_PRIORITY))]
        priority: Option<i64>,
    },
    /// List active tasks, highest priority first.
    List {
        /// Include deactivated tasks.
        #[arg(long)]
        all: bool,
    },
    /// Get a task by ID.
    Get { id: i64 },
    /// Update a task.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(i64).range(MIN_PRIORITY..=MAX_PRIORITY))]
        priority: Option<i64>,
        /// Reactivate (true) or deactivate (false).
        #[arg(long)]
        active: Option<bool>,
    },
    /// Deactivate a task. Its spin history is kept.
    Delete { id: i64 },
}
