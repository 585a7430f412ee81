//! Core types shared by the sqlseed loaders.
//!
//! Everything here is pure: scalar values and their SQL literal encoding,
//! the `GO`-delimited batch splitter, typed rows, the operations handed to
//! the run loop, and the explicit run configuration.

pub mod config;
pub mod operation;
pub mod row;
pub mod splitter;
pub mod value;

pub use config::{RunConfig, Verbosity};
pub use operation::{Operation, Origin};
pub use row::{Row, RowError};
pub use splitter::{is_blank, is_delimiter_line, split, split_script};
pub use value::{Value, encode, encode_typed};
