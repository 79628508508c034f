//! Adapter from a continuous signal to a sample stream.

use crate::error::{Error, Result};
use replay_core::{ChannelSet, Sample, SampleSource, SignalFunction, TimeUnit};

/// Samples a [`SignalFunction`] every `interval_ns`, from 0 to its duration.
///
/// Source time is in nanoseconds, so generative input drives exact and
/// interpolated playback like a recording would.
#[derive(Debug, Clone)]
pub struct SampledSource<F> {
    function: F,
    interval_ns: i64,
    next_index: i64,
}

impl<F: SignalFunction> SampledSource<F> {
    pub fn new(function: F, interval_ns: i64) -> Result<Self> {
        if interval_ns <= 0 {
            return Err(Error::InvalidModel(format!(
                "sampling interval must be positive, got {interval_ns} ns"
            )));
        }
        Ok(Self {
            function,
            interval_ns,
            next_index: 0,
        })
    }

    /// Sample at `rate_hz`, rounded to whole nanoseconds.
    pub fn at_rate(function: F, rate_hz: f64) -> Result<Self> {
        if !(rate_hz.is_finite() && rate_hz > 0.0) {
            return Err(Error::InvalidModel(format!("sampling rate {rate_hz} Hz must be positive")));
        }
        Self::new(function, (1e9 / rate_hz).round() as i64)
    }

    pub fn function(&self) -> &F {
        &self.function
    }
}

impl<F: SignalFunction> SampleSource for SampledSource<F> {
    fn time_unit(&self) -> TimeUnit {
        TimeUnit::Nanoseconds
    }

    fn available(&self) -> ChannelSet {
        ChannelSet::only(self.function.group())
    }

    fn next_sample(&mut self) -> replay_core::Result<Option<Sample>> {
        let time = self.next_index * self.interval_ns;
        if time > self.function.duration_ns() {
            return Ok(None);
        }
        let value = self.function.value_at(time)?;
        self.next_index += 1;
        Ok(Some(Sample::with_group(time, self.function.group(), value)))
    }

    fn rewind(&mut self) -> replay_core::Result<()> {
        self.next_index = 0;
        Ok(())
    }
}
