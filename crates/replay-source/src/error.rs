//! Error types.

use thiserror::Error;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No header contains "timestamp".
    #[error("No timestamp column among headers {0:?}")]
    MissingTimestamp(Vec<String>),

    /// A cell that is present but not a number.
    #[error("Line {line}, column '{column}': cannot parse '{value}'")]
    InvalidCell {
        line: u64,
        column: String,
        value: String,
    },

    /// Invalid model parameters or input data.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Error from the core runtime.
    #[error(transparent)]
    Core(#[from] replay_core::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for replay_core::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Core(inner) => inner,
            other => replay_core::Error::Source(Box::new(other)),
        }
    }
}
