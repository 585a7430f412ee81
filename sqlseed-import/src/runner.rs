//! The dependency-tolerant run loop.
//!
//! Operations run strictly in input order on one connection. An operation
//! that fails on an integrity constraint (typically a row whose parent has
//! not been loaded yet) is deferred; after the first pass every deferred
//! operation is retried exactly once, in the order it was deferred.
//! Whatever still fails is reported, never retried again, and never stops
//! the run.
//!
//! The loop does not open transactions. Callers wanting all-or-nothing wrap
//! the run in one; callers in autocommit get per-statement durability.

use std::collections::VecDeque;

use sqlseed_core::{Operation, Row, RunConfig};
use sqlseed_db::{Database, MetadataCache};

use crate::display;
use crate::error::RunError;
use crate::executor::{ExecutionOutcome, StatementExecutor};
use crate::planner::{self, PlannedStatement};
use crate::progress::{RunProgress, SilentProgress};
use crate::report::RunReport;

/// Operations waiting for the retry pass, with the error that sent them
/// there.
#[derive(Debug, Default)]
struct DeferredQueue {
    entries: VecDeque<(Operation, RunError)>,
}

impl DeferredQueue {
    fn push(&mut self, operation: Operation, error: RunError) {
        self.entries.push_back((operation, error));
    }

    fn pop_front(&mut self) -> Option<(Operation, RunError)> {
        self.entries.pop_front()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One run over one connection. Consumed by [`RunLoop::run`]; the metadata
/// cache lives exactly as long as the run.
pub struct RunLoop<'a, D: Database + ?Sized> {
    executor: StatementExecutor<'a, D>,
    metadata: MetadataCache,
    progress: &'a dyn RunProgress,
}

impl<'a, D: Database + ?Sized> RunLoop<'a, D> {
    pub fn new(db: &'a D, config: RunConfig) -> Self {
        Self {
            executor: StatementExecutor::new(db, config),
            metadata: MetadataCache::new(),
            progress: &SilentProgress,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn RunProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn run(mut self, operations: impl IntoIterator<Item = Operation>) -> RunReport {
        let operations: Vec<Operation> = operations.into_iter().collect();
        let total = operations.len();
        let config = *self.executor.config();
        let mut report = RunReport::default();
        let mut deferred = DeferredQueue::default();

        for (i, operation) in operations.into_iter().enumerate() {
            self.progress.on_operation(i + 1, total, &operation);
            report.record_attempt();

            match self.attempt(&operation) {
                ExecutionOutcome::Success => report.record_success(),
                ExecutionOutcome::SkippedIdempotent => report.record_skip(),
                ExecutionOutcome::Failed(error) if error.is_integrity_violation() => {
                    log::warn!(
                        "{}",
                        display::warning(&config, "Statement(s) failed. Saving for retry.")
                    );
                    log::warn!("  {}: {}", operation.summary(), error);
                    deferred.push(operation, error);
                }
                ExecutionOutcome::Failed(error) => {
                    log::warn!("{}", display::failure(&config, "Statement(s) failed."));
                    log::warn!(
                        "  {}: {}",
                        operation.summary(),
                        display::failure(&config, &error.to_string())
                    );
                    report.record_failure(operation, error);
                }
            }
        }

        if !deferred.is_empty() {
            report.record_deferred(deferred.len());
            self.progress.on_retry_pass(deferred.len());

            while let Some((operation, first_error)) = deferred.pop_front() {
                log::debug!("Retrying {} (was: {})", operation.summary(), first_error);
                match self.attempt(&operation) {
                    ExecutionOutcome::Success => {
                        report.record_success();
                        report.record_recovered();
                    }
                    ExecutionOutcome::SkippedIdempotent => {
                        report.record_skip();
                        report.record_recovered();
                    }
                    ExecutionOutcome::Failed(error) => {
                        log::warn!("{}", display::failure(&config, "Retry failed."));
                        log::warn!(
                            "  {}: {}",
                            operation.summary(),
                            display::failure(&config, &error.to_string())
                        );
                        report.record_failure(operation, error);
                    }
                }
            }
        }

        self.progress.on_complete(&report);
        report
    }

    fn attempt(&mut self, operation: &Operation) -> ExecutionOutcome {
        match operation {
            Operation::ScriptBatch { text, .. } => self.executor.execute(text),
            Operation::RowUpsert { table, row, .. } => self.attempt_upsert(table, row),
        }
    }

    fn attempt_upsert(&mut self, table: &str, row: &Row) -> ExecutionOutcome {
        let db = self.executor.database();
        let meta = match self.metadata.resolve(db, table) {
            Ok(meta) => meta,
            Err(e) => return ExecutionOutcome::Failed(e.into()),
        };

        match planner::plan(db, meta, row) {
            Ok(PlannedStatement::NoOpUpdate { table, key }) => {
                if self.executor.config().echo_statements() {
                    log::info!("Nothing to update: {} WHERE {}", table, key);
                }
                ExecutionOutcome::SkippedIdempotent
            }
            Ok(planned) => match planned.sql() {
                Some(sql) => self.executor.execute(sql),
                None => ExecutionOutcome::SkippedIdempotent,
            },
            Err(e) => ExecutionOutcome::Failed(e.into()),
        }
    }
}

/// Run `operations` against `db` with no progress reporting.
pub fn run<D: Database + ?Sized>(
    db: &D,
    operations: impl IntoIterator<Item = Operation>,
    config: RunConfig,
) -> RunReport {
    RunLoop::new(db, config).run(operations)
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
