//! Exact mode: every sample at the real-time instant of its own timestamp.

use super::Scheduler;
use crate::clock::{Clock, ClockMapping};
use crate::error::{Error, Result};
use crate::sink::{Emission, SensorSink};
use crate::source::SampleSource;
use crate::types::ChannelSet;
use tracing::debug;

impl<'s, C: Clock, K: SensorSink + ?Sized> Scheduler<'s, C, K> {
    /// Returns `true` when the pass was stopped early.
    pub(super) fn play_exact<S: SampleSource + ?Sized>(
        &mut self,
        source: &mut S,
        channels: ChannelSet,
    ) -> Result<bool> {
        let unit = source.time_unit();
        let mut mapping: Option<ClockMapping> = None;
        let mut previous: Option<i64> = None;

        while let Some(sample) = source.next_sample()? {
            let time = sample.source_time;
            if let Some(previous) = previous {
                // Equal timestamps are allowed: interleaved rows share them
                if time < previous {
                    return Err(Error::NonMonotonic {
                        previous,
                        current: time,
                    });
                }
            }
            previous = Some(time);

            let mapping = *mapping.get_or_insert_with(|| ClockMapping::pin(time, self.clock.now_ns(), unit));
            let target = mapping.to_real_ns(time);
            if !self.wait_until(target) {
                return Ok(true);
            }

            let offset_ns = target - mapping.real_origin_ns();
            for group in channels.iter() {
                match sample.vector(group) {
                    Some(value) => self.deliver(Emission {
                        group,
                        value,
                        offset_ns,
                    })?,
                    None => {
                        self.metrics.record_skip();
                        debug!(%group, source_time = time, "incomplete row skipped");
                    }
                }
            }
        }

        if previous.is_none() {
            debug!("source produced no samples");
        }
        Ok(false)
    }
}
