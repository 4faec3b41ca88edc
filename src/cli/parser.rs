use crate::models::LeaveReason;
use clap::{Parser, Subcommand};

/// Command-line interface definition for worktime
#[derive(Parser)]
#[command(
    name = "worktime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work intervals and leave days, list monthly timelines and export yearly sheets",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Enable debug logging (otherwise RUST_LOG is honoured)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage worked intervals
    Work {
        #[command(subcommand)]
        action: WorkAction,
    },

    /// Manage leave days and ranges
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Manage public holidays
    Holiday {
        #[command(subcommand)]
        action: HolidayAction,
    },

    /// Show the monthly timeline with running totals
    List {
        #[arg(long, short, value_name = "YYYY-MM", help = "Month to show (default: current)")]
        month: Option<String>,

        #[arg(long, help = "Show every month of the year plus the year summary")]
        year: bool,

        #[arg(long, help = "Print the summaries as JSON")]
        json: bool,
    },

    /// Export a spreadsheet with one sheet per year
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Years to export: YYYY or YYYY:YYYY (default: all)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkAction {
    /// Record a worked interval
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: String,
    },

    /// Change an existing interval
    Edit {
        id: i64,

        #[arg(long, help = "New date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "in", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New end time (HH:MM)")]
        end: Option<String>,
    },

    /// Delete an interval by id
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    /// Record leave from FROM to TO (inclusive)
    Add {
        from: String,
        to: Option<String>,

        #[arg(long, value_enum)]
        reason: LeaveReason,
    },

    /// Show the leave range containing DATE
    Show { date: String },

    /// Replace the leave range containing DATE
    Edit {
        date: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long, value_enum, help = "New reason (default: keep)")]
        reason: Option<LeaveReason>,
    },

    /// Delete the leave range containing DATE, or only FROM..TO of it
    Del {
        date: String,

        #[arg(long, requires = "to")]
        from: Option<String>,

        #[arg(long, requires = "from")]
        to: Option<String>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HolidayAction {
    /// Mark DATE as a holiday
    Add {
        date: String,

        #[arg(long, default_value = "")]
        name: String,
    },

    /// Remove the holiday on DATE
    Del { date: String },

    /// List holidays of a year (default: current)
    List {
        #[arg(long)]
        year: Option<i32>,
    },
}
