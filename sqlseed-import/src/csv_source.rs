//! Reads CSV data files into row-upsert operations.
//!
//! The header row names the columns; every later record is one row for the
//! table named by the file. All cells are text: the literal encoder decides
//! per value whether it is sent as a number, and an empty cell is NULL.

use std::path::{Path, PathBuf};

use sqlseed_core::{Operation, Origin, Row, Value};

use crate::error::SourceError;

/// One CSV file's worth of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub table: String,
    pub path: PathBuf,
    pub rows: Vec<Row>,
}

impl CsvTable {
    fn source_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.table.clone())
    }

    /// Upserts in file order, tagged with the file name and record number.
    pub fn operations(&self) -> Vec<Operation> {
        let source = self.source_name();
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Operation::upsert(self.table.clone(), row.clone())
                    .with_origin(Origin::new(source.clone(), i + 1))
            })
            .collect()
    }
}

/// Table name from a file name: the last dot-separated part of the stem, so
/// `metric.MetricVariant.csv` loads into `MetricVariant`.
pub fn table_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.rsplit('.').next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

pub fn read_csv_file(path: &Path) -> Result<CsvTable, SourceError> {
    let bytes = std::fs::read(path).map_err(|e| SourceError::io(path, e))?;
    let content = String::from_utf8(bytes).map_err(|_| SourceError::Encoding {
        path: path.to_path_buf(),
    })?;
    read_csv_str(path, &content)
}

/// Parse CSV text as if it had been read from `path`.
pub fn read_csv_str(path: &Path, content: &str) -> Result<CsvTable, SourceError> {
    let table = table_name_from_path(path).ok_or_else(|| SourceError::TableName {
        path: path.to_path_buf(),
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let csv_error = |source| SourceError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.is_empty() {
        return Err(SourceError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let values: Vec<Value> = record.iter().map(Value::from).collect();
        let row = Row::new(columns.clone(), values).map_err(|source| SourceError::Row {
            path: path.to_path_buf(),
            record: i + 1,
            source,
        })?;
        rows.push(row);
    }

    log::debug!("Read {} row(s) for {} from {}", rows.len(), table, path.display());
    Ok(CsvTable {
        table,
        path: path.to_path_buf(),
        rows,
    })
}

/// Order tables for loading: the named priority tables first, in the order
/// given (matched case-insensitively), then everything else by file name.
pub fn order_by_priority(mut tables: Vec<CsvTable>, priority: &[String]) -> Vec<CsvTable> {
    tables.sort_by_cached_key(|t| {
        let rank = priority
            .iter()
            .position(|p| p.eq_ignore_ascii_case(&t.table))
            .unwrap_or(usize::MAX);
        (rank, t.path.file_name().map(|n| n.to_os_string()))
    });
    tables
}

#[cfg(test)]
#[path = "tests/csv_source_tests.rs"]
mod tests;
