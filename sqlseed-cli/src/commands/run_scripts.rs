use std::path::{Path, PathBuf};

use sqlseed_core::Operation;
use sqlseed_import::display::{emphasis, warning};
use sqlseed_import::{LogProgress, RunLoop, RunReport, script_operations};

use super::{Context, confirm, open_database_at, print_report};
use crate::discovery::{discover_scripts, display_path, subdirectories};
use crate::error::CliError;

/// Run the scripts under `path`, in autocommit mode.
///
/// Without `[scripts.databases]` in settings the whole tree is one run
/// against the configured database. With it, each mapped top-level
/// subdirectory is its own run against its own database; unmapped
/// subdirectories are skipped.
pub(crate) fn run_scripts(
    ctx: &Context,
    path: &Path,
    yes: bool,
) -> Result<Vec<RunReport>, CliError> {
    if ctx.settings.scripts.databases.is_empty() {
        let database = ctx.database_path()?;
        return Ok(vec![run_directory(ctx, path, database, yes)?]);
    }

    let mut reports = Vec::new();
    for dir in subdirectories(path)? {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(database) = ctx.settings.scripts.database_for(&name) else {
            log::warn!(
                "{} No database mapped for {}, skipping",
                warning(&ctx.config, "!"),
                display_path(&dir, path)
            );
            continue;
        };
        log::info!("");
        log::info!(
            "{}",
            emphasis(&ctx.config, &format!("{} -> {}", name, database.display()))
        );
        reports.push(run_directory(ctx, &dir, database, yes)?);
    }
    Ok(reports)
}

fn run_directory(
    ctx: &Context,
    dir: &Path,
    database: &Path,
    yes: bool,
) -> Result<RunReport, CliError> {
    let scripts = discover_scripts(dir, &ctx.settings.scripts)?;
    if scripts.is_empty() {
        log::info!("No .sql files found under {}", dir.display());
        return Ok(RunReport::default());
    }

    log::info!("{}", emphasis(&ctx.config, "Scripts to run:"));
    for script in &scripts {
        log::info!("  {}", display_path(script, dir));
    }

    if !yes
        && !confirm(&format!(
            "Run {} script(s) against {}?",
            scripts.len(),
            database.display()
        ))?
    {
        return Err(CliError::Cancelled);
    }

    let operations = load_operations(&scripts, dir)?;
    let conn = open_database_at(database)?;
    log::info!(
        "Running {} batch(es) from {} file(s)",
        operations.len(),
        scripts.len()
    );
    let report = RunLoop::new(&conn, ctx.config)
        .with_progress(&LogProgress)
        .run(operations);

    print_report(&report, &ctx.config);
    Ok(report)
}

fn load_operations(scripts: &[PathBuf], base: &Path) -> Result<Vec<Operation>, CliError> {
    let mut operations = Vec::new();
    for script in scripts {
        let batches = script_operations(script)?;
        log::debug!("{}: {} batch(es)", display_path(script, base), batches.len());
        operations.extend(batches);
    }
    Ok(operations)
}
