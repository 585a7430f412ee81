//! Units of work handed to the run loop.

use std::fmt;

use crate::row::Row;

/// Where an operation came from, for reporting only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Source name, usually a file name.
    pub source: String,
    /// 1-based batch or record number within the source.
    pub index: usize,
}

impl Origin {
    pub fn new(source: impl Into<String>, index: usize) -> Self {
        Self {
            source: source.into(),
            index,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.source, self.index)
    }
}

/// One operation of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A SQL batch executed verbatim.
    ScriptBatch {
        text: String,
        origin: Option<Origin>,
    },
    /// A row reconciled against `table` by primary key.
    RowUpsert {
        table: String,
        row: Row,
        origin: Option<Origin>,
    },
}

impl Operation {
    pub fn script(text: impl Into<String>) -> Self {
        Operation::ScriptBatch {
            text: text.into(),
            origin: None,
        }
    }

    pub fn upsert(table: impl Into<String>, row: Row) -> Self {
        Operation::RowUpsert {
            table: table.into(),
            row,
            origin: None,
        }
    }

    pub fn with_origin(mut self, new_origin: Origin) -> Self {
        match &mut self {
            Operation::ScriptBatch { origin, .. } | Operation::RowUpsert { origin, .. } => {
                *origin = Some(new_origin);
            }
        }
        self
    }

    pub fn origin(&self) -> Option<&Origin> {
        match self {
            Operation::ScriptBatch { origin, .. } | Operation::RowUpsert { origin, .. } => {
                origin.as_ref()
            }
        }
    }

    /// Short one-line description for logs and reports.
    pub fn summary(&self) -> String {
        let body = match self {
            Operation::ScriptBatch { text, .. } => {
                let first = text
                    .lines()
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .unwrap_or("");
                truncate(first, 72)
            }
            Operation::RowUpsert { table, row, .. } => {
                let preview: Vec<String> = row
                    .iter()
                    .take(3)
                    .map(|(c, v)| format!("{c}={v}"))
                    .collect();
                let more = if row.len() > 3 { ", ..." } else { "" };
                format!("{table} ({}{more})", preview.join(", "))
            }
        };
        match self.origin() {
            Some(origin) => format!("[{origin}] {body}"),
            None => body,
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
