//! Runs a single statement and classifies what happened.

use sqlseed_core::{RunConfig, is_blank};
use sqlseed_db::Database;

use crate::display;
use crate::error::RunError;

/// Result of attempting one statement or operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Success,
    /// Nothing to do: the object already existed, or the row was unchanged.
    SkippedIdempotent,
    Failed(RunError),
}

/// Sends statements to a database on behalf of the run loop.
///
/// No existence pre-check is made: a duplicate create is sent, rejected by
/// the database, and then classified as a skip.
pub struct StatementExecutor<'a, D: Database + ?Sized> {
    db: &'a D,
    config: RunConfig,
}

impl<'a, D: Database + ?Sized> StatementExecutor<'a, D> {
    pub fn new(db: &'a D, config: RunConfig) -> Self {
        Self { db, config }
    }

    pub fn database(&self) -> &'a D {
        self.db
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn execute(&self, statement: &str) -> ExecutionOutcome {
        if is_blank(statement) {
            return ExecutionOutcome::SkippedIdempotent;
        }

        if self.config.echo_statements() {
            log::info!("{}", display::dimmed(&self.config, statement.trim_end()));
        }

        match self.db.execute_statement(statement) {
            Ok(()) => ExecutionOutcome::Success,
            Err(e) if e.is_already_exists() => {
                log::debug!("Already exists, skipping: {}", e);
                ExecutionOutcome::SkippedIdempotent
            }
            Err(e) => ExecutionOutcome::Failed(RunError::Execution(e)),
        }
    }
}

#[cfg(test)]
#[path = "tests/executor_tests.rs"]
mod tests;
