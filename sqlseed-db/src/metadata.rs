//! Table metadata resolution with a per-run cache.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::database::Database;
use crate::dialect::Dialect;
use crate::error::MetadataError;

/// What the planner needs to know about a target table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    pub schema: Option<String>,
    pub table_name: String,
    pub has_identity: bool,
    /// Primary-key columns in declared key order.
    pub primary_key_columns: Vec<String>,
}

impl TableMetadata {
    pub fn qualified_name(&self, dialect: Dialect) -> String {
        dialect.qualify(self.schema.as_deref(), &self.table_name)
    }

    pub fn is_key_column(&self, column: &str) -> bool {
        self.primary_key_columns
            .iter()
            .any(|pk| pk.eq_ignore_ascii_case(column))
    }
}

/// Split `schema.table` into its parts. A name without a dot has no schema.
pub fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once('.') {
        Some((schema, table)) if !schema.is_empty() && !table.is_empty() => (Some(schema), table),
        _ => (None, name),
    }
}

/// Query the catalog for `table`, which may be written `schema.table`.
pub fn resolve<D: Database + ?Sized>(db: &D, table: &str) -> Result<TableMetadata, MetadataError> {
    let catalog_error = |source| MetadataError::Catalog {
        table: table.to_string(),
        source,
    };

    let (schema, name) = split_qualified(table);
    let info = db
        .table_info(schema, name)
        .map_err(catalog_error)?
        .ok_or_else(|| MetadataError::TableNotFound(table.to_string()))?;
    let columns = db.column_info(&info).map_err(catalog_error)?;
    let primary_key_columns = db.primary_key_columns(&info).map_err(catalog_error)?;

    let metadata = TableMetadata {
        schema: info.schema,
        table_name: info.name,
        has_identity: columns.iter().any(|c| c.is_identity()),
        primary_key_columns,
    };
    log::debug!(
        "Resolved {}: key ({}), identity: {}",
        metadata.table_name,
        metadata.primary_key_columns.join(", "),
        metadata.has_identity,
    );
    Ok(metadata)
}

/// Resolved metadata keyed by case-folded table name. Lives for one run.
///
/// Only successful lookups are cached; a missing table is looked up again
/// for each of its rows and fails each time.
#[derive(Debug, Default)]
pub struct MetadataCache {
    tables: HashMap<String, TableMetadata>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<D: Database + ?Sized>(
        &mut self,
        db: &D,
        table: &str,
    ) -> Result<&TableMetadata, MetadataError> {
        match self.tables.entry(table.to_lowercase()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let metadata = resolve(db, table)?;
                Ok(entry.insert(metadata))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
