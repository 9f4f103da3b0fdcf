use chrono::NaiveDate;
use clap::Subcommand;

/// Report commands. All dates are UTC.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Today.
    Daily,
    /// Monday through Sunday of the current week.
    Weekly,
    /// The first of the month through today.
    Monthly,
    /// An inclusive date range.
    Custom {
        /// First day, YYYY-MM-DD.
        #[arg(long)]
        start: NaiveDate,
        /// Last day, YYYY-MM-DD.
        #[arg(long)]
        end: NaiveDate,
    },
}
