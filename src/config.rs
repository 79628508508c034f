//! Replay configuration file.
//!
//! ```toml
//! [playback]
//! channels = ["accelerometer", "gyroscope"]
//! repetitions = 3
//! period_ms = 5.0
//! kind = "pchip"
//!
//! [console]
//! host = "localhost"
//! port = 5556
//! ```

use crate::Result;
use replay_core::PlaybackConfig;
use replay_sink::ConsoleConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Playback and console settings. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub playback: PlaybackConfig,
    pub console: ConsoleConfig,
}

impl ReplayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.playback.validate()?;
        self.console.validate()?;
        Ok(())
    }
}
