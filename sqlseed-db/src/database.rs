//! The connection abstraction the run loop executes against.

use crate::dialect::Dialect;
use crate::error::DbError;

/// Catalog entry for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub schema: Option<String>,
    /// Name as stored in the catalog (may differ in case from the lookup).
    pub name: String,
}

/// A column and its type name as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub type_name: String,
}

impl ColumnInfo {
    /// Catalogs report identity columns with `identity` in the type name
    /// (`int identity` over ODBC; the SQLite driver does the same for
    /// `AUTOINCREMENT` keys).
    pub fn is_identity(&self) -> bool {
        self.type_name.to_lowercase().contains("identity")
    }
}

/// Synchronous database session.
///
/// Method names avoid rusqlite's inherent `execute`/`exists` so the trait
/// can be implemented on `Connection` without shadowing.
pub trait Database {
    /// Text conventions for statements sent to this database.
    fn dialect(&self) -> Dialect;

    /// Execute a statement or multi-statement batch.
    ///
    /// A batch runs statement by statement. Statements failing with an
    /// already-exists error are skipped and the rest still run; that error is
    /// returned only when no statement in the batch took effect. Any other
    /// failure stops the batch and is returned as is.
    fn execute_statement(&self, sql: &str) -> Result<(), DbError>;

    /// Run a query and report whether it returned at least one row.
    fn row_exists(&self, query: &str) -> Result<bool, DbError>;

    /// Look up a table in the catalog, in `schema` when given and in the
    /// default schema otherwise. `Ok(None)` when either does not exist.
    fn table_info(&self, schema: Option<&str>, table: &str) -> Result<Option<TableInfo>, DbError>;

    /// Columns of a catalogued table in declaration order.
    fn column_info(&self, table: &TableInfo) -> Result<Vec<ColumnInfo>, DbError>;

    /// Primary-key columns in key order. Empty for a table without one.
    fn primary_key_columns(&self, table: &TableInfo) -> Result<Vec<String>, DbError>;
}
