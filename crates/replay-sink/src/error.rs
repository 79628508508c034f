//! Error types.

use thiserror::Error;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output log error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No address of the console accepted a connection.
    #[error("Cannot connect to console at {address}: {reason}")]
    Connect { address: String, reason: String },

    /// The console refused the auth token or never answered it.
    #[error("Console authentication failed: {0}")]
    Auth(String),

    /// Invalid configuration.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for replay_core::Error {
    fn from(e: Error) -> Self {
        match e {
            unavailable @ (Error::Connect { .. } | Error::Auth(_)) => {
                replay_core::Error::SinkUnavailable(unavailable.to_string())
            }
            Error::InvalidConfig(reason) => replay_core::Error::InvalidConfig(reason),
            Error::Io(inner) => replay_core::Error::Io(inner),
            other => replay_core::Error::Source(Box::new(other)),
        }
    }
}
