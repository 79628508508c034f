//! Console connection settings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where and how to reach the device console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub host: String,
    pub port: u16,
    /// Sent as `auth <token>` right after connecting.
    pub auth_token: Option<String>,
    pub connect_timeout_ms: u64,
    /// How long to wait for a response line in verbose mode.
    pub ack_timeout_ms: u64,
    /// Quiet period that ends the greeting banner.
    pub banner_timeout_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5554,
            auth_token: None,
            connect_timeout_ms: 2_000,
            ack_timeout_ms: 1_000,
            banner_timeout_ms: 200,
        }
    }
}

impl ConsoleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("console host is empty".into()));
        }
        if self.port == 0 {
            return Err(Error::InvalidConfig("console port must be non-zero".into()));
        }
        for (name, value) in [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("ack_timeout_ms", self.ack_timeout_ms),
            ("banner_timeout_ms", self.banner_timeout_ms),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    pub fn banner_timeout(&self) -> Duration {
        Duration::from_millis(self.banner_timeout_ms)
    }
}
