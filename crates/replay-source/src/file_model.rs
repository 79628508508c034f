//! Whole-recording interpolation model.

use crate::csv_source::CsvSource;
use crate::error::{Error, Result};
use replay_core::{
    ChannelGroup, InterpolantKind, Sample, SampleSource, SignalFunction, TimeUnit, Vec3,
    VectorInterpolant,
};
use std::path::Path;
use tracing::{debug, info};

/// One interpolant per axis over every row of a recording.
///
/// Times are rebased so the first row is at zero. Unlike the sliding window the
/// whole file is held in memory, which lets playback run at any rate.
#[derive(Debug, Clone)]
pub struct FileModel {
    group: ChannelGroup,
    interpolant: VectorInterpolant,
    duration_ns: i64,
}

impl FileModel {
    /// Load the accelerometer columns of a CSV recording.
    pub fn load(path: impl AsRef<Path>, kind: InterpolantKind) -> Result<Self> {
        Self::load_group(path, ChannelGroup::Accelerometer, kind)
    }

    pub fn load_group(
        path: impl AsRef<Path>,
        group: ChannelGroup,
        kind: InterpolantKind,
    ) -> Result<Self> {
        let mut source = CsvSource::open(path)?;
        if !source.available().contains(group) {
            return Err(Error::Core(replay_core::Error::ChannelUnavailable(group)));
        }
        if source.time_unit() == TimeUnit::Nanoseconds {
            info!("using nanosecond time column");
        }
        let mut samples = Vec::new();
        while let Some(sample) = source.next_row()? {
            samples.push(sample);
        }
        Self::from_samples(source.time_unit(), group, &samples, kind)
    }

    /// Build from samples in source order. Rows missing an axis are skipped.
    pub fn from_samples(
        unit: TimeUnit,
        group: ChannelGroup,
        samples: &[Sample],
        kind: InterpolantKind,
    ) -> Result<Self> {
        let rows: Vec<(i64, Vec3)> = samples
            .iter()
            .filter_map(|s| s.vector(group).map(|v| (s.source_time, v)))
            .collect();
        if rows.len() < samples.len() {
            debug!(skipped = samples.len() - rows.len(), "incomplete rows left out of the model");
        }
        let origin = rows
            .first()
            .map(|(t, _)| *t)
            .ok_or(replay_core::Error::InsufficientSamples {
                needed: 2,
                available: 0,
            })?;
        if let Some(w) = rows.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(Error::Core(replay_core::Error::NonMonotonic {
                previous: w[0].0,
                current: w[1].0,
            }));
        }

        let scale = unit.nanos_per_unit();
        let knots: Vec<f64> = rows
            .iter()
            .map(|(t, _)| ((t - origin) * scale) as f64 / 1e9)
            .collect();
        let values: Vec<Vec3> = rows.iter().map(|(_, v)| *v).collect();
        let interpolant = VectorInterpolant::build(kind, &knots, &values)?;
        let duration_ns = rows.last().map_or(0, |(t, _)| (t - origin) * scale);

        debug!(rows = rows.len(), duration_ns, %kind, "built file model");
        Ok(Self {
            group,
            interpolant,
            duration_ns,
        })
    }
}

impl SignalFunction for FileModel {
    fn group(&self) -> ChannelGroup {
        self.group
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
        self.interpolant.evaluate(offset_ns as f64 / 1e9)
    }
}
