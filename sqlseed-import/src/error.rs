use std::path::PathBuf;

use sqlseed_core::RowError;
use sqlseed_db::{DbError, MetadataError};
use thiserror::Error;

use crate::planner::PlanError;

/// Why an operation failed during a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    #[error("{0}")]
    Execution(#[from] DbError),
    #[error("{0}")]
    Metadata(#[from] MetadataError),
    #[error("{0}")]
    Plan(#[from] PlanError),
}

impl RunError {
    /// Only statement failures caused by constraints are worth retrying;
    /// a missing table or a syntax error will not fix itself.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, RunError::Execution(e) if e.is_integrity_violation())
    }
}

/// Failure reading an input file into operations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is neither UTF-8 nor UTF-16 text")]
    Encoding { path: PathBuf },
    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{path}: record {record}: {source}")]
    Row {
        path: PathBuf,
        record: usize,
        source: RowError,
    },
    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },
    #[error("Cannot derive a table name from {path}")]
    TableName { path: PathBuf },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
