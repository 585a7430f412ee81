//! sqlseed CLI
//!
//! Runs deployment scripts and CSV seed data against a database, tolerating
//! out-of-order dependencies and reruns.

mod cli_types;
mod commands;
mod discovery;
mod error;
mod logging;
mod settings;

use clap::Parser;
use sqlseed_core::{RunConfig, Verbosity};
use sqlseed_import::display::failure;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    if cli.no_color {
        owo_colors::set_override(false);
    }

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    let ctx = Context {
        config: RunConfig::new(verbosity, !cli.no_color),
        settings: settings::load_settings(),
        database: cli.database,
    };

    let clean = match dispatch(&ctx, cli.command) {
        Ok(clean) => clean,
        Err(CliError::Cancelled) => {
            log::info!("Cancelled.");
            true
        }
        Err(e) => {
            log::error!("{} {}", failure(&ctx.config, "\u{2718}"), e);
            false
        }
    };

    if !clean {
        std::process::exit(1);
    }
}

/// Run one command. `Ok(false)` means it finished with failed operations.
fn dispatch(ctx: &Context, command: Commands) -> Result<bool, CliError> {
    match command {
        Commands::RunScripts { path, yes } => commands::run_scripts::run_scripts(ctx, &path, yes)
            .map(|reports| reports.iter().all(|r| r.is_clean())),
        Commands::LoadCsv {
            path,
            priority,
            autocommit,
        } => commands::load_csv::load_csv(ctx, &path, priority, autocommit).map(|r| r.is_clean()),
        Commands::GenerateInsert {
            table,
            output,
            dialect,
        } => commands::generate_insert::generate_insert(ctx, &table, output, dialect).map(|_| true),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(ctx).map(|_| true),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(true)
            }
        },
    }
}
