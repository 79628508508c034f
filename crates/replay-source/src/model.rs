//! Synthetic accelerometer signals.
//!
//! A [`WaveModel`] is a sum of sines per axis with standard gravity added on z.
//! Parameters are drawn from a seeded RNG, so a seed always reproduces the same
//! signal.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use replay_core::{ChannelGroup, SignalFunction, Vec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 2;

/// Motion intensity presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Magnitude {
    /// Three gentle waves, amplitude 0.2-1.0, 0.1-2 Hz.
    Mock,
    Lower,
    #[default]
    Normal,
    Higher,
}

impl Magnitude {
    /// `(dominant amplitude, amplitude range)` for the magnitude presets.
    fn preset(self) -> Option<(f64, (f64, f64))> {
        match self {
            Magnitude::Mock => None,
            Magnitude::Lower => Some((2.5, (-2.0, 2.0))),
            Magnitude::Normal => Some((4.5, (-3.5, 3.5))),
            Magnitude::Higher => Some((10.0, (-6.0, 6.0))),
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Magnitude::Mock => "mock",
            Magnitude::Lower => "lower",
            Magnitude::Normal => "normal",
            Magnitude::Higher => "higher",
        };
        f.write_str(name)
    }
}

impl FromStr for Magnitude {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mock" => Ok(Magnitude::Mock),
            "lower" => Ok(Magnitude::Lower),
            "normal" => Ok(Magnitude::Normal),
            "higher" => Ok(Magnitude::Higher),
            other => Err(Error::InvalidModel(format!("unknown magnitude '{other}'"))),
        }
    }
}

/// One sine component: `amplitude · sin(2π·f·t + phase)` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub amplitude: Vec3,
    pub frequency_hz: f64,
    pub phase: Vec3,
}

/// Sum-of-sines accelerometer model with gravity on z.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveModel {
    waves: Vec<Wave>,
    duration_ns: i64,
}

impl WaveModel {
    /// Default signal length: ten seconds.
    pub const DEFAULT_DURATION_NS: i64 = 10_000_000_000;

    pub fn from_waves(waves: Vec<Wave>) -> Self {
        Self {
            waves,
            duration_ns: Self::DEFAULT_DURATION_NS,
        }
    }

    /// `count` waves with every parameter drawn uniformly from the given ranges.
    pub fn random(
        count: usize,
        amplitude: (f64, f64),
        frequency_hz: (f64, f64),
        seed: u64,
    ) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidModel("a wave model needs at least one wave".into()));
        }
        for (name, (low, high)) in [("amplitude", amplitude), ("frequency", frequency_hz)] {
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(Error::InvalidModel(format!(
                    "{name} range [{low}, {high}) is empty"
                )));
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut waves = Vec::with_capacity(count);
        for _ in 0..count {
            let amplitude = [(); 3].map(|_| rng.gen_range(amplitude.0..amplitude.1));
            let frequency_hz = rng.gen_range(frequency_hz.0..frequency_hz.1);
            let phase = [(); 3].map(|_| rng.gen_range(0.0..TAU));
            waves.push(Wave {
                amplitude,
                frequency_hz,
                phase,
            });
        }
        Ok(Self::from_waves(waves))
    }

    /// Preset model. Magnitude presets use five waves whose first one is
    /// pinned to the dominant amplitude at 2 Hz with zero phase.
    pub fn with_magnitude(magnitude: Magnitude, seed: u64) -> Result<Self> {
        let Some((dominant, range)) = magnitude.preset() else {
            return Self::random(3, (0.2, 1.0), (0.1, 2.0), seed);
        };
        let mut model = Self::random(5, range, (0.1, 8.0), seed)?;
        model.waves[0] = Wave {
            amplitude: [dominant; 3],
            frequency_hz: 2.0,
            phase: [0.0; 3],
        };
        Ok(model)
    }

    pub fn with_duration_ns(mut self, duration_ns: i64) -> Self {
        self.duration_ns = duration_ns.max(0);
        self
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// Acceleration at `t` seconds. Defined for any `t`.
    pub fn value_at_secs(&self, t: f64) -> Vec3 {
        let mut acc = [0.0; 3];
        for wave in &self.waves {
            let omega = TAU * wave.frequency_hz;
            for axis in 0..3 {
                acc[axis] += wave.amplitude[axis] * (omega * t + wave.phase[axis]).sin();
            }
        }
        acc[2] += STANDARD_GRAVITY;
        acc
    }
}

impl SignalFunction for WaveModel {
    fn group(&self) -> ChannelGroup {
        ChannelGroup::Accelerometer
    }

    fn duration_ns(&self) -> i64 {
        self.duration_ns
    }

    fn value_at(&self, offset_ns: i64) -> replay_core::Result<Vec3> {
        if !(0..=self.duration_ns).contains(&offset_ns) {
            return Err(replay_core::Error::OutOfDomain {
                at: offset_ns as f64 / 1e9,
                start: 0.0,
                end: self.duration_ns as f64 / 1e9,
            });
        }
        Ok(self.value_at_secs(offset_ns as f64 / 1e9))
    }
}
