//! Producer side of playback: streamed samples and time-domain functions.

use crate::error::Result;
use crate::types::{ChannelGroup, ChannelSet, Sample, TimeUnit, Vec3};

/// Lazy, single-pass, finite sequence of samples.
///
/// Restarting goes through [`SampleSource::rewind`], which reopens or reseeks
/// the underlying input rather than replaying buffered samples.
pub trait SampleSource {
    /// Unit of [`Sample::source_time`].
    fn time_unit(&self) -> TimeUnit;

    /// Channel groups whose three axes were all located in the input.
    fn available(&self) -> ChannelSet;

    fn next_sample(&mut self) -> Result<Option<Sample>>;

    fn rewind(&mut self) -> Result<()>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn time_unit(&self) -> TimeUnit {
        (**self).time_unit()
    }

    fn available(&self) -> ChannelSet {
        (**self).available()
    }

    fn next_sample(&mut self) -> Result<Option<Sample>> {
        (**self).next_sample()
    }

    fn rewind(&mut self) -> Result<()> {
        (**self).rewind()
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn time_unit(&self) -> TimeUnit {
        (**self).time_unit()
    }

    fn available(&self) -> ChannelSet {
        (**self).available()
    }

    fn next_sample(&mut self) -> Result<Option<Sample>> {
        (**self).next_sample()
    }

    fn rewind(&mut self) -> Result<()> {
        (**self).rewind()
    }
}

/// In-memory sample source.
#[derive(Debug, Clone)]
pub struct MemorySource {
    samples: Vec<Sample>,
    cursor: usize,
    unit: TimeUnit,
    available: ChannelSet,
}

impl MemorySource {
    /// A group counts as available when at least one sample carries all of
    /// its axes.
    pub fn new(unit: TimeUnit, samples: Vec<Sample>) -> Self {
        let available = ChannelGroup::ALL
            .into_iter()
            .filter(|group| samples.iter().any(|s| s.vector(*group).is_some()))
            .collect();
        Self {
            samples,
            cursor: 0,
            unit,
            available,
        }
    }

    /// Override the detected availability, e.g. to mimic a missing column.
    pub fn with_available(mut self, available: ChannelSet) -> Self {
        self.available = available;
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleSource for MemorySource {
    fn time_unit(&self) -> TimeUnit {
        self.unit
    }

    fn available(&self) -> ChannelSet {
        self.available
    }

    fn next_sample(&mut self) -> Result<Option<Sample>> {
        let sample = self.samples.get(self.cursor).cloned();
        if sample.is_some() {
            self.cursor += 1;
        }
        Ok(sample)
    }

    fn rewind(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }
}

/// Continuous time-domain signal of one channel group over `[0, duration]`.
pub trait SignalFunction {
    fn group(&self) -> ChannelGroup;

    /// Length of the signal in nanoseconds.
    fn duration_ns(&self) -> i64;

    /// Value at `offset_ns` from the start of the signal.
    fn value_at(&self, offset_ns: i64) -> Result<Vec3>;
}

impl<F: SignalFunction + ?Sized> SignalFunction for &F {
    fn group(&self) -> ChannelGroup {
        (**self).group()
    }

    fn duration_ns(&self) -> i64 {
        (**self).duration_ns()
    }

    fn value_at(&self, offset_ns: i64) -> Result<Vec3> {
        (**self).value_at(offset_ns)
    }
}

impl<F: SignalFunction + ?Sized> SignalFunction for Box<F> {
    fn group(&self) -> ChannelGroup {
        (**self).group()
    }

    fn duration_ns(&self) -> i64 {
        (**self).duration_ns()
    }

    fn value_at(&self, offset_ns: i64) -> Result<Vec3> {
        (**self).value_at(offset_ns)
    }
}
