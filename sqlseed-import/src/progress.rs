//! Run progress reporting.

use sqlseed_core::Operation;

use crate::report::RunReport;

/// Trait for receiving run progress updates.
pub trait RunProgress {
    /// Called before each first-pass operation is attempted.
    fn on_operation(&self, current: usize, total: usize, operation: &Operation);

    /// Called when the retry pass starts.
    fn on_retry_pass(&self, deferred: usize);

    /// Called once the run has finished.
    fn on_complete(&self, report: &RunReport);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl RunProgress for SilentProgress {
    fn on_operation(&self, _current: usize, _total: usize, _operation: &Operation) {}
    fn on_retry_pass(&self, _deferred: usize) {}
    fn on_complete(&self, _report: &RunReport) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl RunProgress for LogProgress {
    fn on_operation(&self, current: usize, total: usize, operation: &Operation) {
        if current.is_multiple_of(500) || current == total {
            log::info!("  [{}/{}] {}", current, total, operation.summary());
        } else {
            log::debug!("  [{}/{}] {}", current, total, operation.summary());
        }
    }

    fn on_retry_pass(&self, deferred: usize) {
        log::info!("Retrying {} deferred operation(s)", deferred);
    }

    fn on_complete(&self, report: &RunReport) {
        log::info!(
            "Run complete: {} attempted, {} succeeded, {} skipped, {} failed",
            report.attempted(),
            report.succeeded(),
            report.skipped(),
            report.failed(),
        );
    }
}
