pub(crate) mod config;
pub(crate) mod generate_insert;
pub(crate) mod load_csv;
pub(crate) mod run_scripts;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use sqlseed_core::RunConfig;
use sqlseed_import::RunReport;
use sqlseed_import::display::{emphasis, failure, success, warning};

use crate::error::CliError;
use crate::settings::Settings;

/// Everything a command needs besides its own arguments.
pub(crate) struct Context {
    pub config: RunConfig,
    pub settings: Settings,
    pub database: Option<PathBuf>,
}

impl Context {
    /// `--database`, else `database` from settings.toml.
    pub(crate) fn database_path(&self) -> Result<&Path, CliError> {
        self.database
            .as_deref()
            .or(self.settings.database.as_deref())
            .ok_or_else(|| {
                CliError::config(
                    "no database given: pass --database or set `database` in settings.toml",
                )
            })
    }

    pub(crate) fn open_database(&self) -> Result<Connection, CliError> {
        open_database_at(self.database_path()?)
    }
}

pub(crate) fn open_database_at(path: &Path) -> Result<Connection, CliError> {
    log::debug!("Opening {}", path.display());
    sqlseed_db::open_database(path)
        .map_err(|e| CliError::database(format!("cannot open {}: {}", path.display(), e)))
}

/// Ask a yes/no question; only `Y` or `y` counts as yes.
pub(crate) fn confirm_with<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim() == "y" || answer.trim() == "Y")
}

pub(crate) fn confirm(prompt: &str) -> Result<bool, CliError> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    Ok(confirm_with(prompt, &mut stdin.lock(), &mut stdout)?)
}

/// Log the run summary and every operation that still fails.
pub(crate) fn print_report(report: &RunReport, config: &RunConfig) {
    log::info!("");
    log::info!("{}", emphasis(config, "Summary"));
    log::info!("  Attempted:  {}", report.attempted());
    log::info!("  Succeeded:  {}", report.succeeded());
    log::info!("  Skipped:    {}", report.skipped());
    if report.deferred() > 0 {
        log::info!(
            "  Retried:    {} ({} recovered)",
            report.deferred(),
            report.recovered_on_retry()
        );
    }

    if report.is_clean() {
        log::info!("{} No failures", success(config, "\u{2714}"));
        return;
    }

    log::warn!(
        "{} {} operation(s) failed:",
        failure(config, "\u{2718}"),
        report.failed()
    );
    for failed in report.still_failing() {
        log::warn!("  {}", warning(config, &failed.operation.summary()));
        log::warn!("    {}", failure(config, &failed.error.to_string()));
    }
}
