//! Error types for ems-output.

use thiserror::Error;

/// Errors that can occur when writing simulation reports.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A metric row does not match the header the writer was opened with.
    #[error("metric row has {got} values but the header has {expected} tags")]
    MetricWidth { expected: usize, got: usize },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
