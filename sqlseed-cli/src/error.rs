use thiserror::Error;

/// Errors that stop a CLI command before or around a run.
///
/// Statement failures inside a run are not errors here; they end up in the
/// run report.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Opening the database or managing its transaction failed
    #[error("Database error: {0}")]
    Database(String),

    /// Reading an input file failed
    #[error("{0}")]
    Source(#[from] sqlseed_import::SourceError),

    /// Insert-script generation failed
    #[error("{0}")]
    Generate(#[from] sqlseed_import::GenerateError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// User declined the confirmation prompt
    #[error("Cancelled")]
    Cancelled,
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
