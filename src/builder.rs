//! Builder for configuring and constructing a `ReplayEngine`.

use crate::{ReplayConfig, ReplayEngine, Result};
use replay_core::{Clock, StopSignal, SystemClock};

/// The configuration is validated by [`build`](Self::build), so a built engine
/// never starts a pass with a zero repetition count or an unusable period.
///
/// # Example
///
/// ```ignore
/// use sensor_replay::prelude::*;
///
/// let stop = StopSignal::new();
/// let engine = ReplayEngine::builder()
///     .config(ReplayConfig::load("replay.toml")?)
///     .stop_signal(stop.clone())
///     .build()?;
/// ```
pub struct ReplayEngineBuilder<C: Clock = SystemClock> {
    config: ReplayConfig,
    clock: C,
    stop: Option<StopSignal>,
}

impl Default for ReplayEngineBuilder<SystemClock> {
    fn default() -> Self {
        Self {
            config: ReplayConfig::default(),
            clock: SystemClock::new(),
            stop: None,
        }
    }
}

impl<C: Clock> ReplayEngineBuilder<C> {
    pub fn config(mut self, config: ReplayConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the time source, e.g. a `ManualClock` in tests.
    pub fn clock<D: Clock>(self, clock: D) -> ReplayEngineBuilder<D> {
        ReplayEngineBuilder {
            config: self.config,
            clock,
            stop: self.stop,
        }
    }

    /// Share a stop signal created before the engine, e.g. by a signal handler.
    pub fn stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn build(self) -> Result<ReplayEngine<C>> {
        self.config.validate()?;
        Ok(ReplayEngine::from_parts(
            self.config,
            self.clock,
            self.stop.unwrap_or_default(),
        ))
    }
}
