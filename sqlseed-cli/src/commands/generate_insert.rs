use std::path::PathBuf;

use sqlseed_db::Dialect;
use sqlseed_import::display::success;
use sqlseed_import::write_insert_script;

use super::Context;
use crate::error::CliError;

/// Dump `table` as `InsertDataFor<table>.sql` in `output`.
pub(crate) fn generate_insert(
    ctx: &Context,
    table: &str,
    output: Option<PathBuf>,
    dialect: Dialect,
) -> Result<PathBuf, CliError> {
    let output = output.unwrap_or_else(|| PathBuf::from("."));
    if !output.is_dir() {
        std::fs::create_dir_all(&output)?;
    }

    let conn = ctx.open_database()?;
    let written = write_insert_script(&conn, table, dialect, &output)?;
    log::info!(
        "{} Wrote {} ({} dialect)",
        success(&ctx.config, "\u{2714}"),
        written.display(),
        dialect
    );
    Ok(written)
}
