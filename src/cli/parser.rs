use crate::db::import::ImportKind;
use crate::export::{ExportFormat, ExportTarget};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rLaborLog
#[derive(Parser)]
#[command(
    name = "rlaborlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Reconcile submitted labor hours with clock events and track labor cost against contract budgets",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a single raw record
    Add {
        #[command(subcommand)]
        record: AddRecord,
    },

    /// Import raw records from a CSV file
    Import {
        #[arg(long, value_enum)]
        kind: ImportKind,

        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Reconcile submitted hours against clock events
    Verify {
        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD or A:B (default: current month)")]
        range: Option<String>,

        #[arg(long, help = "Only records for this company")]
        company: Option<String>,

        #[arg(long, help = "Only records with this status: pass, mismatch, incomplete")]
        status: Option<String>,
    },

    /// Labor cost rollups for approved submissions
    Costs {
        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD or A:B (default: current month)")]
        range: Option<String>,

        #[arg(long, help = "Only submissions for this company")]
        company: Option<String>,

        #[arg(long, help = "Rollup order: cost, hours or name")]
        sort: Option<String>,
    },

    /// Budget burndown against a company's contract amount
    Burndown {
        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD or A:B (default: current month)")]
        range: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long, help = "Contract amount to use instead of the stored budget")]
        amount: Option<f64>,
    },

    /// Export a report
    Export {
        #[arg(long, value_enum)]
        report: ExportTarget,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long, help = "Contract amount for the burndown report instead of the stored budget")]
        amount: Option<f64>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum AddRecord {
    /// Self-reported hours for one worker-day
    Submission {
        #[arg(long)]
        worker: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        company: String,

        #[arg(long, default_value = "")]
        project: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long)]
        hours: f64,

        #[arg(long, default_value = "pending", help = "pending, approved or rejected")]
        status: String,
    },

    /// Clock-in (start) or clock-out (end) event
    Clock {
        #[arg(long)]
        worker: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long, help = "start or end")]
        kind: String,

        #[arg(long, help = "HH:MM or YYYY-MM-DD HH:MM[:SS]")]
        time: String,

        #[arg(long, default_value = "")]
        reporter: String,
    },

    /// Hourly billing rate for a worker
    Rate {
        #[arg(long)]
        worker: String,

        #[arg(long)]
        rate: f64,
    },

    /// Contract budget for a company
    Budget {
        #[arg(long)]
        company: String,

        #[arg(long)]
        amount: f64,
    },

    /// Registered worker profile
    Profile {
        #[arg(long)]
        worker: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        company: Option<String>,
    },
}
