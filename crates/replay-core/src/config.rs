//! Playback configuration.

use crate::interp::InterpolantKind;
use crate::types::{ChannelGroup, ChannelSet};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a playback pass paces its emissions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackMode {
    /// Emit every sample at the real-time instant of its own timestamp.
    Exact,
    /// Emit a reconstructed value of `group` every `period_ns`.
    Interpolated {
        group: ChannelGroup,
        period_ns: i64,
        kind: InterpolantKind,
    },
}

/// Configuration for one replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Requested channel groups; narrowed to what the input provides.
    pub channels: ChannelSet,
    pub repetitions: u32,
    /// Output period in milliseconds. Unset means exact mode.
    pub period_ms: Option<f64>,
    /// Group reconstructed in interpolated mode.
    pub interpolate: ChannelGroup,
    pub kind: InterpolantKind,
    /// Read back and report the consumer's acknowledgement for each emission.
    pub verbose: bool,
    /// Longest uninterrupted sleep before the stop signal is checked again.
    pub poll_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            channels: ChannelSet::all(),
            repetitions: 1,
            period_ms: None,
            interpolate: ChannelGroup::Accelerometer,
            kind: InterpolantKind::NaturalCubic,
            verbose: false,
            poll_interval_ms: 50,
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<()> {
        if self.channels.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one channel group must be requested".into(),
            ));
        }
        if self.repetitions == 0 {
            return Err(Error::InvalidConfig("repetitions must be at least 1".into()));
        }
        if let Some(period) = self.period_ms {
            if !period.is_finite() || period <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "period {period} ms must be a positive number"
                )));
            }
            if self.period_ns() == Some(0) {
                return Err(Error::InvalidConfig(format!(
                    "period {period} ms is below clock resolution"
                )));
            }
            if !self.channels.contains(self.interpolate) {
                return Err(Error::InvalidConfig(format!(
                    "interpolated group {} is not among the requested channels",
                    self.interpolate
                )));
            }
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "poll_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn period_ns(&self) -> Option<i64> {
        self.period_ms.map(|ms| (ms * 1e6).round() as i64)
    }

    pub fn poll_interval_ns(&self) -> i64 {
        self.poll_interval_ms as i64 * 1_000_000
    }

    pub fn mode(&self) -> PlaybackMode {
        match self.period_ns() {
            None => PlaybackMode::Exact,
            Some(period_ns) => PlaybackMode::Interpolated {
                group: self.interpolate,
                period_ns,
                kind: self.kind,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlaybackConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode(), PlaybackMode::Exact);
        assert_eq!(config.channels, ChannelSet::all());
    }

    #[test]
    fn test_interpolated_mode() {
        let config = PlaybackConfig {
            period_ms: Some(5.0),
            kind: InterpolantKind::Pchip,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(
            config.mode(),
            PlaybackMode::Interpolated {
                group: ChannelGroup::Accelerometer,
                period_ns: 5_000_000,
                kind: InterpolantKind::Pchip,
            }
        );
    }

    #[test]
    fn test_invalid_configs() {
        let bad = [
            PlaybackConfig {
                repetitions: 0,
                ..Default::default()
            },
            PlaybackConfig {
                period_ms: Some(-1.0),
                ..Default::default()
            },
            PlaybackConfig {
                period_ms: Some(f64::NAN),
                ..Default::default()
            },
            PlaybackConfig {
                channels: ChannelSet::empty(),
                ..Default::default()
            },
            PlaybackConfig {
                channels: ChannelSet::only(ChannelGroup::Gyroscope),
                period_ms: Some(10.0),
                ..Default::default()
            },
            PlaybackConfig {
                poll_interval_ms: 0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{config:?}"
            );
        }
    }
}
