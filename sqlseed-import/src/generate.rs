//! Dump a table as a replayable INSERT script.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use sqlseed_core::encode_typed;
use sqlseed_db::{DbError, Dialect, MetadataError, fetch_table, resolve};
use thiserror::Error;

use crate::planner::insert_sql;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Metadata(#[from] MetadataError),
    #[error("Reading {table} failed: {source}")]
    Database { table: String, source: DbError },
    #[error("Writing {path} failed: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// `InsertDataFor<table>.sql`
pub fn insert_script_file_name(table: &str) -> String {
    format!("InsertDataFor{table}.sql")
}

/// One INSERT per row of `table`, one per line, written for `dialect`.
///
/// Values keep their stored types: text that looks numeric stays quoted.
/// When the table has an identity column and the dialect needs it, the
/// whole script is bracketed by one identity-insert ON/OFF pair.
pub fn generate_insert_script(
    conn: &Connection,
    table: &str,
    dialect: Dialect,
) -> Result<String, GenerateError> {
    let meta = resolve(conn, table)?;
    let source_table = meta.qualified_name(Dialect::Sqlite);
    let data = fetch_table(conn, &source_table).map_err(|source| GenerateError::Database {
        table: meta.table_name.clone(),
        source,
    })?;

    let target_table = meta.qualified_name(dialect);
    let mut lines = Vec::with_capacity(data.rows.len() + 2);
    let toggles = if meta.has_identity {
        dialect
            .identity_insert(&target_table, true)
            .zip(dialect.identity_insert(&target_table, false))
    } else {
        None
    };

    if let Some((on, _)) = &toggles {
        lines.push(on.clone());
    }
    for row in &data.rows {
        lines.push(insert_sql(dialect, &target_table, &data.columns, row, encode_typed));
    }
    if let Some((_, off)) = toggles {
        lines.push(off);
    }

    log::debug!("Generated {} insert(s) for {}", data.rows.len(), meta.table_name);
    let mut script = lines.join("\n");
    script.push('\n');
    Ok(script)
}

/// Generate the script and write it as [`insert_script_file_name`] under
/// `dir`. Returns the written path.
pub fn write_insert_script(
    conn: &Connection,
    table: &str,
    dialect: Dialect,
    dir: &Path,
) -> Result<PathBuf, GenerateError> {
    let script = generate_insert_script(conn, table, dialect)?;
    let path = dir.join(insert_script_file_name(table));
    std::fs::write(&path, script).map_err(|source| GenerateError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
#[path = "tests/generate_tests.rs"]
mod tests;
