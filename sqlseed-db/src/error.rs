//! Driver error classification.

use thiserror::Error;

/// What kind of failure a driver error represents, as far as the run loop
/// cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// The object being created is already there. Treated as a no-op.
    AlreadyExists,
    /// Foreign key, unique, not-null or check constraint failure.
    IntegrityViolation,
    /// Syntax, permission, missing object and everything else.
    Other,
}

/// Message fragments drivers use for duplicate-object errors
/// (SQLite/PostgreSQL/MySQL, then SQL Server).
const ALREADY_EXISTS: &[&str] = &["already exists", "there is already an object"];

impl DbErrorKind {
    /// Classify from a SQLSTATE code, falling back to the message text.
    ///
    /// Class `23` is integrity constraint violation. `42S01`/`42S11` (ODBC),
    /// `42P07`/`42710` (PostgreSQL, DB2) are duplicate-object codes.
    pub fn classify(sqlstate: Option<&str>, message: &str) -> Self {
        if let Some(state) = sqlstate {
            if state.starts_with("23") {
                return DbErrorKind::IntegrityViolation;
            }
            if matches!(state, "42S01" | "42S11" | "42P07" | "42P06" | "42710") {
                return DbErrorKind::AlreadyExists;
            }
        }
        Self::from_message(message)
    }

    /// Last-resort classification by message text.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if ALREADY_EXISTS.iter().any(|fragment| lower.contains(fragment)) {
            DbErrorKind::AlreadyExists
        } else {
            DbErrorKind::Other
        }
    }
}

/// A driver error with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DbError {
    pub kind: DbErrorKind,
    /// Driver-specific code (SQLSTATE or extended result code), if any.
    pub code: Option<String>,
    pub message: String,
}

impl DbError {
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::Other, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind == DbErrorKind::AlreadyExists
    }

    pub fn is_integrity_violation(&self) -> bool {
        self.kind == DbErrorKind::IntegrityViolation
    }
}

/// Catalog lookup failure. Fatal for the table's operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Catalog query for {table} failed: {source}")]
    Catalog { table: String, source: DbError },
}
