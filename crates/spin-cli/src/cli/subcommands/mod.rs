mod report;
mod stats;
mod task;

pub use report::ReportCommands;
pub use stats::StatsCommands;
pub use task::TaskCommands;
