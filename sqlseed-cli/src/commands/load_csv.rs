use std::path::Path;

use sqlseed_import::display::emphasis;
use sqlseed_import::{CsvTable, LogProgress, RunLoop, RunReport, order_by_priority, read_csv_file};

use super::{Context, print_report};
use crate::discovery::{discover_csv, display_path};
use crate::error::CliError;

/// Upsert every CSV file in `path` as one run.
///
/// Unless `autocommit` is set the whole run shares one transaction, committed
/// at the end whether or not some operations failed.
pub(crate) fn load_csv(
    ctx: &Context,
    path: &Path,
    priority: Option<Vec<String>>,
    autocommit: bool,
) -> Result<RunReport, CliError> {
    let files = discover_csv(path)?;
    if files.is_empty() {
        log::info!("No .csv files found in {}", path.display());
        return Ok(RunReport::default());
    }

    log::info!("{}", emphasis(&ctx.config, "Data files:"));
    let mut tables = Vec::with_capacity(files.len());
    for file in &files {
        let table = read_csv_file(file)?;
        log::info!(
            "  {} -> {} ({} rows)",
            display_path(file, path),
            table.table,
            table.rows.len()
        );
        tables.push(table);
    }

    let priority = priority.unwrap_or_else(|| ctx.settings.csv.priority.clone());
    let operations: Vec<_> = order_by_priority(tables, &priority)
        .iter()
        .flat_map(CsvTable::operations)
        .collect();

    let conn = ctx.open_database()?;
    let report = if autocommit {
        RunLoop::new(&conn, ctx.config)
            .with_progress(&LogProgress)
            .run(operations)
    } else {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| CliError::database(format!("cannot begin transaction: {e}")))?;
        let report = RunLoop::new(&*tx, ctx.config)
            .with_progress(&LogProgress)
            .run(operations);
        tx.commit()
            .map_err(|e| CliError::database(format!("commit failed: {e}")))?;
        report
    };

    print_report(&report, &ctx.config);
    Ok(report)
}
