//! Typed rows: an ordered column list paired with one value per column.

use std::collections::HashSet;

use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("Row has no columns")]
    NoColumns,
    #[error("Row has {columns} column(s) but {values} value(s)")]
    LengthMismatch { columns: usize, values: usize },
    #[error("Column {0} has an empty name")]
    EmptyColumnName(usize),
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// A candidate row for a table.
///
/// The column/value association is checked once at construction, so later
/// stages can pair columns with values positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Result<Self, RowError> {
        if columns.is_empty() {
            return Err(RowError::NoColumns);
        }
        if columns.len() != values.len() {
            return Err(RowError::LengthMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
        let mut seen = HashSet::new();
        for (i, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(RowError::EmptyColumnName(i));
            }
            if !seen.insert(column.to_lowercase()) {
                return Err(RowError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a value by column name (case-insensitive, like SQL identifiers).
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .map(|i| &self.values[i])
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

#[cfg(test)]
#[path = "tests/row_tests.rs"]
mod tests;
