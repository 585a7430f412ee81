//! SQL text conventions that differ between target databases.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Sqlite,
    SqlServer,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Quote an identifier, doubling the closing quote character.
    pub fn quote_ident(self, ident: &str) -> String {
        match self {
            Dialect::Sqlite => format!("\"{}\"", ident.replace('"', "\"\"")),
            Dialect::SqlServer => format!("[{}]", ident.replace(']', "]]")),
        }
    }

    /// `schema.table`, each part quoted. Without a schema just the table.
    pub fn qualify(self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(schema) if !schema.is_empty() => {
                format!("{}.{}", self.quote_ident(schema), self.quote_ident(table))
            }
            _ => self.quote_ident(table),
        }
    }

    /// Statement toggling explicit inserts into an identity column, for
    /// dialects that require one. SQLite accepts explicit rowid values, so it
    /// has none.
    pub fn identity_insert(self, qualified_table: &str, enabled: bool) -> Option<String> {
        match self {
            Dialect::Sqlite => None,
            Dialect::SqlServer => Some(format!(
                "SET IDENTITY_INSERT {} {};",
                qualified_table,
                if enabled { "ON" } else { "OFF" }
            )),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string cannot be parsed into a `Dialect`.
#[derive(Debug, Clone)]
pub struct DialectParseError(pub String);

impl fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dialect: '{}' (expected sqlite or sqlserver)", self.0)
    }
}

impl std::error::Error for DialectParseError {}

impl std::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "sqlserver" | "mssql" | "tsql" => Ok(Dialect::SqlServer),
            _ => Err(DialectParseError(s.to_string())),
        }
    }
}
