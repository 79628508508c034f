//! Centralized error type for the sensor-replay umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] replay_core::Error),

    #[error("Source: {0}")]
    Source(#[from] replay_source::Error),

    #[error("Sink: {0}")]
    Sink(#[from] replay_sink::Error),

    #[error("Config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config file: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
