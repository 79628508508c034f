//! Interpolated mode: a four-sample spline window sampled at a fixed period.
//!
//! The clock is pinned on the window's second entry when it first fills. Each
//! tick slides the window while `now` is past its third entry, so `now` always
//! lies inside the interpolant's knots until the source runs dry. After that the
//! last interpolant is served up to its final knot.

use super::Scheduler;
use crate::clock::{Clock, ClockMapping};
use crate::error::{Error, Result};
use crate::interp::{InterpolantKind, SlidingWindow, WINDOW_LEN};
use crate::sink::{Emission, SensorSink};
use crate::source::SampleSource;
use crate::types::{ChannelGroup, Vec3};
use tracing::{debug, trace};

/// Window entry the clock mapping is pinned on.
const ANCHOR_INDEX: usize = 1;
/// Window entry that `now` must not pass without a slide.
const SLIDE_INDEX: usize = 2;

impl<'s, C: Clock, K: SensorSink + ?Sized> Scheduler<'s, C, K> {
    /// Returns `true` when the pass was stopped early.
    pub(super) fn play_interpolated<S: SampleSource + ?Sized>(
        &mut self,
        source: &mut S,
        group: ChannelGroup,
        period_ns: i64,
        kind: InterpolantKind,
    ) -> Result<bool> {
        let mut window = SlidingWindow::new();
        while !window.is_primed() {
            match self.next_complete(source, group)? {
                Some((time, value)) => window.push(time, value)?,
                None => {
                    return Err(Error::InsufficientSamples {
                        needed: WINDOW_LEN,
                        available: window.len(),
                    })
                }
            }
        }

        let start = self.clock.now_ns();
        let mapping = ClockMapping::pin(window.time(ANCHOR_INDEX), start, source.time_unit());
        let mut interpolant = window.build(kind, &mapping)?;
        let mut exhausted = false;
        let mut deadline = start;

        loop {
            if !self.wait_until(deadline) {
                return Ok(true);
            }
            let now = self.clock.now_ns();

            while !exhausted && now > mapping.to_real_ns(window.time(SLIDE_INDEX)) {
                match self.next_complete(source, group)? {
                    Some((time, value)) => {
                        window.push(time, value)?;
                        interpolant = window.build(kind, &mapping)?;
                        self.metrics.record_slide();
                        trace!(source_time = time, "window slid");
                    }
                    None => {
                        exhausted = true;
                        debug!("source exhausted, serving the last window");
                    }
                }
            }

            let at = mapping.offset_secs(now);
            if exhausted && at > interpolant.domain().1 {
                break;
            }
            let value = interpolant.evaluate(at)?;
            self.deliver(Emission {
                group,
                value,
                offset_ns: now - start,
            })?;
            deadline += period_ns;
        }
        Ok(false)
    }

    /// Next sample carrying every axis of `group`; incomplete rows are counted
    /// and skipped.
    fn next_complete<S: SampleSource + ?Sized>(
        &self,
        source: &mut S,
        group: ChannelGroup,
    ) -> Result<Option<(i64, Vec3)>> {
        while let Some(sample) = source.next_sample()? {
            match sample.vector(group) {
                Some(value) => return Ok(Some((sample.source_time, value))),
                None => self.metrics.record_skip(),
            }
        }
        Ok(None)
    }
}
