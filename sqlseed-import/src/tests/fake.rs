//! Scriptable in-process `Database` for unit tests.

use std::cell::RefCell;

use sqlseed_db::{ColumnInfo, Database, DbError, Dialect, TableInfo};

struct FakeTable {
    info: TableInfo,
    columns: Vec<ColumnInfo>,
    primary_key: Vec<String>,
}

struct Failure {
    fragment: String,
    error: DbError,
    remaining: usize,
}

pub struct FakeDatabase {
    dialect: Dialect,
    tables: Vec<FakeTable>,
    existing: Vec<String>,
    failures: RefCell<Vec<Failure>>,
    pub executed: RefCell<Vec<String>>,
    pub probes: RefCell<Vec<String>>,
    pub catalog_lookups: RefCell<usize>,
}

impl FakeDatabase {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            tables: Vec::new(),
            existing: Vec::new(),
            failures: RefCell::new(Vec::new()),
            executed: RefCell::new(Vec::new()),
            probes: RefCell::new(Vec::new()),
            catalog_lookups: RefCell::new(0),
        }
    }

    /// Register a table in schema `dbo`. Columns are `(name, type)`.
    pub fn with_table(
        mut self,
        name: &str,
        columns: &[(&str, &str)],
        primary_key: &[&str],
    ) -> Self {
        self.tables.push(FakeTable {
            info: TableInfo {
                schema: Some("dbo".to_string()),
                name: name.to_string(),
            },
            columns: columns
                .iter()
                .map(|(name, type_name)| ColumnInfo {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                })
                .collect(),
            primary_key: primary_key.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    /// `query`, sent verbatim as a probe, finds a row.
    pub fn with_existing(mut self, query: &str) -> Self {
        self.existing.push(query.to_string());
        self
    }

    /// Statements containing `fragment` fail with `error` the next `times`
    /// times they are executed.
    pub fn failing(self, fragment: &str, error: DbError, times: usize) -> Self {
        self.failures.borrow_mut().push(Failure {
            fragment: fragment.to_string(),
            error,
            remaining: times,
        });
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    fn find(&self, table: &str) -> Option<&FakeTable> {
        self.tables
            .iter()
            .find(|t| t.info.name.eq_ignore_ascii_case(table))
    }
}

impl Database for FakeDatabase {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn execute_statement(&self, sql: &str) -> Result<(), DbError> {
        self.executed.borrow_mut().push(sql.to_string());
        let mut failures = self.failures.borrow_mut();
        if let Some(failure) = failures
            .iter_mut()
            .find(|f| f.remaining > 0 && sql.contains(&f.fragment))
        {
            failure.remaining -= 1;
            return Err(failure.error.clone());
        }
        Ok(())
    }

    fn row_exists(&self, query: &str) -> Result<bool, DbError> {
        self.probes.borrow_mut().push(query.to_string());
        Ok(self.existing.iter().any(|q| q == query))
    }

    fn table_info(&self, schema: Option<&str>, table: &str) -> Result<Option<TableInfo>, DbError> {
        *self.catalog_lookups.borrow_mut() += 1;
        Ok(self
            .find(table)
            .filter(|t| schema.is_none_or(|s| t.info.schema.as_deref() == Some(s)))
            .map(|t| t.info.clone()))
    }

    fn column_info(&self, table: &TableInfo) -> Result<Vec<ColumnInfo>, DbError> {
        Ok(self
            .find(&table.name)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    fn primary_key_columns(&self, table: &TableInfo) -> Result<Vec<String>, DbError> {
        Ok(self
            .find(&table.name)
            .map(|t| t.primary_key.clone())
            .unwrap_or_default())
    }
}
