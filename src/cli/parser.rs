use crate::export::{ExportFormat, ExportKind};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rattendance
/// Attendance scans (entrada/salida) and weekly hour totals on SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record attendance scans and compute weekly worked hours using SQLite",
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

/// Reporting window selection shared by `report` and `export`.
/// Defaults to the current week.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    #[arg(
        long = "week",
        value_name = "YYYY-Www",
        conflicts_with = "range",
        help = "ISO week, e.g. 2025-W02"
    )]
    pub week: Option<String>,

    #[arg(
        long = "range",
        value_name = "RANGE",
        help = "Year, month, day or A:B range (YYYY, YYYY-MM, YYYY-MM-DD)"
    )]
    pub range: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
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

    /// Manage the employee directory
    Employee {
        #[command(subcommand)]
        action: EmployeeCommand,
    },

    /// Submit one attendance scan
    Scan {
        /// Raw scan document as JSON (scanner format)
        #[arg(long, value_name = "JSON", conflicts_with_all = ["file", "employee"])]
        payload: Option<String>,

        /// Read the raw scan document from a file
        #[arg(long, value_name = "FILE", conflicts_with = "employee")]
        file: Option<String>,

        /// Employee identity code
        #[arg(long, requires = "action")]
        employee: Option<String>,

        /// entrada | salida
        #[arg(long)]
        action: Option<String>,

        /// Instant with offset (RFC 3339); defaults to now
        #[arg(long, value_name = "TIMESTAMP")]
        at: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// List the scans of one employee
    List {
        /// Employee identity code
        employee: String,

        #[arg(long, value_name = "YYYY-MM-DD", help = "First day (inclusive)")]
        from: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Last day (inclusive)")]
        to: Option<String>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Weekly hours per employee
    Report {
        #[command(flatten)]
        window: WindowArgs,

        #[arg(long = "employee", value_name = "ID", help = "Restrict to these employees")]
        employees: Vec<String>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Export the weekly summary or the detail listing
    Export {
        #[arg(long, value_enum, default_value = "weekly")]
        kind: ExportKind,

        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        window: WindowArgs,

        #[arg(long = "employee", value_name = "ID", help = "Restrict to these employees")]
        employees: Vec<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Register an employee
    Add {
        /// Identity code printed on the badge
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        role: String,
    },

    /// List employees ordered by name
    List {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
}
