//! SQLite driver: [`Database`] for `rusqlite::Connection`.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use sqlseed_core::Value;

use crate::database::{ColumnInfo, Database, TableInfo};
use crate::dialect::Dialect;
use crate::error::{DbError, DbErrorKind};
use crate::statements::split_statements;

/// Schema name SQLite uses for the primary database file.
const MAIN_SCHEMA: &str = "main";

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, message) => {
                let message = message.clone().unwrap_or_else(|| failure.to_string());
                // SQLite has no dedicated duplicate-object code; those arrive
                // as plain SQLITE_ERROR and are recognised by message.
                let kind = if failure.code == ErrorCode::ConstraintViolation {
                    DbErrorKind::IntegrityViolation
                } else {
                    DbErrorKind::from_message(&message)
                };
                DbError::new(kind, message).with_code(failure.extended_code.to_string())
            }
            other => {
                let message = other.to_string();
                DbError::new(DbErrorKind::from_message(&message), message)
            }
        }
    }
}

/// Open or create a database file with foreign keys enforced.
pub fn open_database(path: &Path) -> Result<Connection, DbError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open an in-memory database with foreign keys enforced. Useful for testing.
pub fn open_memory() -> Result<Connection, DbError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

impl Database for Connection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute_statement(&self, sql: &str) -> Result<(), DbError> {
        let mut applied = 0;
        let mut duplicate = None;
        for statement in split_statements(sql) {
            match self.execute_batch(statement).map_err(DbError::from) {
                Ok(()) => applied += 1,
                Err(e) if e.is_already_exists() => {
                    log::debug!("Skipping statement: {}", e);
                    duplicate.get_or_insert(e);
                }
                Err(e) => return Err(e),
            }
        }
        match duplicate {
            Some(e) if applied == 0 => Err(e),
            _ => Ok(()),
        }
    }

    fn row_exists(&self, query: &str) -> Result<bool, DbError> {
        let mut stmt = self.prepare(query)?;
        Ok(stmt.exists([])?)
    }

    fn table_info(&self, schema: Option<&str>, table: &str) -> Result<Option<TableInfo>, DbError> {
        let schema = match schema {
            None => MAIN_SCHEMA.to_string(),
            Some(wanted) => match attached_schema(self, wanted)? {
                Some(found) => found,
                None => return Ok(None),
            },
        };
        let sql = format!(
            "SELECT name FROM {}.sqlite_master \
             WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            Dialect::Sqlite.quote_ident(&schema)
        );
        let name = self
            .query_row(&sql, [table], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(name.map(|name| TableInfo {
            schema: Some(schema),
            name,
        }))
    }

    fn column_info(&self, table: &TableInfo) -> Result<Vec<ColumnInfo>, DbError> {
        let autoincrement = declares_autoincrement(self, table)?;

        let mut stmt =
            self.prepare("SELECT name, type, pk FROM pragma_table_info(?1, ?2) ORDER BY cid")?;
        let columns = stmt
            .query_map(params![table.name, schema_of(table)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        // AUTOINCREMENT is only legal on a single-column INTEGER PRIMARY KEY.
        let key_count = columns.iter().filter(|(_, _, pk)| *pk > 0).count();
        Ok(columns
            .into_iter()
            .map(|(name, type_name, pk)| {
                let type_name = if autoincrement && pk == 1 && key_count == 1 {
                    format!("{type_name} identity")
                } else {
                    type_name
                };
                ColumnInfo { name, type_name }
            })
            .collect())
    }

    fn primary_key_columns(&self, table: &TableInfo) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .prepare("SELECT name FROM pragma_table_info(?1, ?2) WHERE pk > 0 ORDER BY pk")?;
        let names: Vec<String> = stmt
            .query_map(params![table.name, schema_of(table)], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn schema_of(table: &TableInfo) -> &str {
    table.schema.as_deref().unwrap_or(MAIN_SCHEMA)
}

/// Canonical name of an attached database (`main`, `temp`, or an `ATTACH` alias).
fn attached_schema(conn: &Connection, schema: &str) -> Result<Option<String>, DbError> {
    Ok(conn
        .query_row(
            "SELECT name FROM pragma_database_list WHERE name = ?1 COLLATE NOCASE",
            [schema],
            |row| row.get::<_, String>(0),
        )
        .optional()?)
}

fn declares_autoincrement(conn: &Connection, table: &TableInfo) -> Result<bool, DbError> {
    let sql = format!(
        "SELECT sql FROM {}.sqlite_master WHERE type = 'table' AND name = ?1",
        Dialect::Sqlite.quote_ident(schema_of(table))
    );
    let ddl: Option<Option<String>> = conn
        .query_row(&sql, [&table.name], |row| row.get(0))
        .optional()?;
    Ok(ddl
        .flatten()
        .is_some_and(|ddl| ddl.to_uppercase().contains("AUTOINCREMENT")))
}

/// All rows of a table, with column names in select order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Read every row of `qualified_table` (already quoted by the caller).
///
/// Blobs come back as lossy UTF-8 text; the loaders only deal in scalars.
pub fn fetch_table(conn: &Connection, qualified_table: &str) -> Result<TableData, DbError> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {qualified_table}"))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(value_from_ref(row.get_ref(i)?));
        }
        rows.push(values);
    }

    Ok(TableData { columns, rows })
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
