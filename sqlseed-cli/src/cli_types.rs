//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sqlseed_db::Dialect;

#[derive(Parser)]
#[command(name = "sqlseed")]
#[command(about = "Load SQL scripts and CSV seed data into a database", long_about = None)]
pub(crate) struct Cli {
    /// Database file (defaults to `database` in settings.toml)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Echo every statement and enable debug logging (with timestamps)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run every .sql script under a directory
    RunScripts {
        /// Directory to search recursively for .sql files
        #[arg(short, long)]
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upsert rows from every .csv file in a directory
    LoadCsv {
        /// Directory containing <schema>.<Table>.csv files
        #[arg(short, long)]
        path: PathBuf,

        /// Tables to load first, in order (e.g., Metric,MetricVariant)
        #[arg(long, value_delimiter = ',')]
        priority: Option<Vec<String>>,

        /// Commit each statement instead of wrapping the load in one transaction
        #[arg(long)]
        autocommit: bool,
    },

    /// Write an InsertDataFor<table>.sql script from a table's rows
    GenerateInsert {
        /// Table to dump
        #[arg(short, long)]
        table: String,

        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dialect of the generated script (sqlite, sqlserver)
        #[arg(long, default_value = "sqlite")]
        dialect: Dialect,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where they come from
    Show,

    /// Print the settings file path
    Path,
}
