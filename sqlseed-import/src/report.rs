//! The caller-facing summary of a run.

use sqlseed_core::Operation;

use crate::error::RunError;

/// An operation that was still failing when the run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedOperation {
    pub operation: Operation,
    pub error: RunError,
}

/// Counts and permanent failures of one run.
///
/// Built by the run loop and read-only afterwards. Every supplied operation
/// is counted in exactly one of succeeded, skipped, or still failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    attempted: usize,
    succeeded: usize,
    skipped: usize,
    deferred: usize,
    recovered: usize,
    still_failing: Vec<FailedOperation>,
}

impl RunReport {
    /// Operations supplied to the run.
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Idempotent skips: objects that already existed and unchanged rows.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Operations that entered the retry pass.
    pub fn deferred(&self) -> usize {
        self.deferred
    }

    /// Deferred operations that went through on retry.
    pub fn recovered_on_retry(&self) -> usize {
        self.recovered
    }

    pub fn still_failing(&self) -> &[FailedOperation] {
        &self.still_failing
    }

    pub fn failed(&self) -> usize {
        self.still_failing.len()
    }

    /// No permanent failures.
    pub fn is_clean(&self) -> bool {
        self.still_failing.is_empty()
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempted += 1;
    }

    pub(crate) fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub(crate) fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub(crate) fn record_deferred(&mut self, count: usize) {
        self.deferred = count;
    }

    pub(crate) fn record_recovered(&mut self) {
        self.recovered += 1;
    }

    pub(crate) fn record_failure(&mut self, operation: Operation, error: RunError) {
        self.still_failing.push(FailedOperation { operation, error });
    }
}
