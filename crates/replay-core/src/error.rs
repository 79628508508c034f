//! Error types for replay-core.

use crate::types::ChannelGroup;
use thiserror::Error;

/// Boxed error raised by a sample source implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for replay-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Channel group {0} is not available in the input")]
    ChannelUnavailable(ChannelGroup),

    #[error("No channel group left to replay after resolving the input columns")]
    NoChannels,

    #[error("Non-monotonic source time: {current} follows {previous}")]
    NonMonotonic { previous: i64, current: i64 },

    #[error("Interpolation out of bounds: {at:.6}s outside [{start:.6}s, {end:.6}s]")]
    OutOfDomain { at: f64, start: f64, end: f64 },

    #[error("Interpolation needs at least {needed} knots, got {available}")]
    InsufficientSamples { needed: usize, available: usize },

    #[error("Sensor sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Sample source: {0}")]
    Source(#[source] SourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Failure of a single emission into a sensor sink.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SinkError {
    /// The consumer answered, but not with an acknowledgement.
    #[error("Emission rejected: {0}")]
    Rejected(String),

    /// The emission could not be delivered; the transport is still usable.
    #[error("Emission failed: {0}")]
    Failed(String),

    /// The transport itself is gone.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

impl SinkError {
    /// Whether the whole playback run must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SinkError::Unavailable(_))
    }
}
