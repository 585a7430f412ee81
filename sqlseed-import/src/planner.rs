//! Decides whether a candidate row becomes an INSERT, an UPDATE, or nothing.
//!
//! The planner only reads: it may probe the table with `SELECT 1` queries,
//! but the statement it returns is executed by the run loop.

use sqlseed_core::{Row, Value, encode};
use sqlseed_db::{Database, DbError, Dialect, TableMetadata};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStatement {
    Insert { sql: String },
    Update { sql: String },
    /// The row exists and holds the same values; nothing is sent.
    NoOpUpdate { table: String, key: String },
}

impl PlannedStatement {
    /// Statement to execute, `None` for a no-op.
    pub fn sql(&self) -> Option<&str> {
        match self {
            PlannedStatement::Insert { sql } | PlannedStatement::Update { sql } => Some(sql),
            PlannedStatement::NoOpUpdate { .. } => None,
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, PlannedStatement::NoOpUpdate { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Row for {table} has no value for key column {column}")]
    MissingKeyColumn { table: String, column: String },
    #[error("Existence check on {table} failed: {source}")]
    Database { table: String, source: DbError },
}

/// Plan the statement that reconciles `row` with its table.
///
/// Rows of a table without a primary key cannot be matched, so they are
/// always inserted.
pub fn plan<D: Database + ?Sized>(
    db: &D,
    meta: &TableMetadata,
    row: &Row,
) -> Result<PlannedStatement, PlanError> {
    let dialect = db.dialect();
    if meta.primary_key_columns.is_empty() {
        return Ok(PlannedStatement::Insert {
            sql: insert_statement(dialect, meta, row),
        });
    }

    let table = meta.qualified_name(dialect);
    let key = key_predicate(dialect, meta, row)?;
    let probe = |query: String| {
        db.row_exists(&query).map_err(|source| PlanError::Database {
            table: meta.table_name.clone(),
            source,
        })
    };

    if !probe(format!("SELECT 1 FROM {table} WHERE {key}"))? {
        return Ok(PlannedStatement::Insert {
            sql: insert_statement(dialect, meta, row),
        });
    }

    let changes: Vec<(&str, &Value)> = row
        .iter()
        .filter(|(column, _)| !meta.is_key_column(column))
        .collect();
    if changes.is_empty() {
        return Ok(PlannedStatement::NoOpUpdate { table, key });
    }

    let unchanged = predicate(dialect, changes.iter().copied());
    if probe(format!("SELECT 1 FROM {table} WHERE {key} AND {unchanged}"))? {
        return Ok(PlannedStatement::NoOpUpdate { table, key });
    }

    let assignments: Vec<String> = changes
        .iter()
        .map(|(column, value)| format!("{} = {}", dialect.quote_ident(column), encode(value)))
        .collect();
    Ok(PlannedStatement::Update {
        sql: format!("UPDATE {table} SET {} WHERE {key};", assignments.join(", ")),
    })
}

/// `pk1 = v1 AND pk2 = v2` in declared key order.
pub fn key_predicate(
    dialect: Dialect,
    meta: &TableMetadata,
    row: &Row,
) -> Result<String, PlanError> {
    let mut pairs = Vec::with_capacity(meta.primary_key_columns.len());
    for column in &meta.primary_key_columns {
        let value = row.get(column).ok_or_else(|| PlanError::MissingKeyColumn {
            table: meta.table_name.clone(),
            column: column.clone(),
        })?;
        pairs.push((column.as_str(), value));
    }
    Ok(predicate(dialect, pairs.into_iter()))
}

/// AND-joined equality tests; null values compare with `IS NULL`.
fn predicate<'r>(dialect: Dialect, pairs: impl Iterator<Item = (&'r str, &'r Value)>) -> String {
    pairs
        .map(|(column, value)| {
            let column = dialect.quote_ident(column);
            if value.is_null() {
                format!("{column} IS NULL")
            } else {
                format!("{column} = {}", encode(value))
            }
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// INSERT of every row column, wrapped in identity-insert toggles when the
/// table has an identity column and the dialect needs them.
pub fn insert_statement(dialect: Dialect, meta: &TableMetadata, row: &Row) -> String {
    let table = meta.qualified_name(dialect);
    let insert = insert_sql(dialect, &table, row.columns(), row.values(), encode);
    if meta.has_identity {
        wrap_identity_insert(dialect, &table, insert)
    } else {
        insert
    }
}

/// `INSERT INTO table (cols) VALUES (literals);` with a caller-chosen encoder.
pub fn insert_sql(
    dialect: Dialect,
    qualified_table: &str,
    columns: &[String],
    values: &[Value],
    encoder: fn(&Value) -> String,
) -> String {
    let columns: Vec<String> = columns.iter().map(|c| dialect.quote_ident(c)).collect();
    let values: Vec<String> = values.iter().map(encoder).collect();
    format!(
        "INSERT INTO {qualified_table} ({}) VALUES ({});",
        columns.join(", "),
        values.join(", ")
    )
}

/// Bracket a single insert with identity toggles so the setting never
/// outlives the statement on a shared session.
pub fn wrap_identity_insert(dialect: Dialect, qualified_table: &str, insert: String) -> String {
    match (
        dialect.identity_insert(qualified_table, true),
        dialect.identity_insert(qualified_table, false),
    ) {
        (Some(on), Some(off)) => format!("{on} {insert} {off}"),
        _ => insert,
    }
}

#[cfg(test)]
#[path = "tests/planner_tests.rs"]
mod tests;
