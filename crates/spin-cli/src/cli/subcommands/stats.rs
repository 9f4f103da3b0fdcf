use clap::Subcommand;

/// Statistics commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StatsCommands {
    /// Total spins, active tasks, completion rate, most drawn task.
    Summary,
    /// Spin count per active task.
    Frequency,
    /// Spin totals per category.
    Categories,
    /// Percentage of spins completed.
    Completion,
    /// Every spin in the last N days.
    Analytics {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Spins per day over the last N days.
    Timeline {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Spins per day and hour over the last N days.
    Heatmap {
        #[arg(long)]
        days: Option<u32>,
    },
}
