//! The dependency-tolerant loading engine.
//!
//! Operations (script batches and row upserts) are executed in order against
//! one connection. Integrity failures are deferred and retried exactly once
//! at the end; "already exists" failures and unchanged rows count as skips.
//! This crate also owns the sources that turn script and CSV files into
//! operations, and insert-script generation.

pub mod csv_source;
pub mod display;
pub mod error;
pub mod executor;
pub mod generate;
pub mod planner;
pub mod progress;
pub mod report;
pub mod runner;
pub mod script_source;

pub use csv_source::{
    CsvTable, order_by_priority, read_csv_file, read_csv_str, table_name_from_path,
};
pub use error::{RunError, SourceError};
pub use executor::{ExecutionOutcome, StatementExecutor};
pub use generate::{
    GenerateError, generate_insert_script, insert_script_file_name, write_insert_script,
};
pub use planner::{PlanError, PlannedStatement, plan};
pub use progress::{LogProgress, RunProgress, SilentProgress};
pub use report::{FailedOperation, RunReport};
pub use runner::{RunLoop, run};
pub use script_source::{decode_script, read_script_file, script_operations};

#[cfg(test)]
#[path = "tests/fake.rs"]
pub(crate) mod fake;
