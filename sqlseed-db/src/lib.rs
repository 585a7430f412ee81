//! Database boundary for the sqlseed loaders.
//!
//! The run loop only talks to the [`Database`] trait. The SQLite driver
//! (via rusqlite with the bundled feature) implements it directly on
//! `rusqlite::Connection`, so a `Transaction` works too through deref.

pub mod database;
pub mod dialect;
pub mod error;
pub mod metadata;
pub mod sqlite;
pub mod statements;

pub use database::{ColumnInfo, Database, TableInfo};
pub use dialect::{Dialect, DialectParseError};
pub use error::{DbError, DbErrorKind, MetadataError};
pub use metadata::{MetadataCache, TableMetadata, resolve, split_qualified};
pub use sqlite::{TableData, fetch_table, open_database, open_memory};
pub use statements::split_statements;
