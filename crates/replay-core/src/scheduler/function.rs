//! Function mode: a continuous signal sampled against the real clock.

use super::Scheduler;
use crate::clock::Clock;
use crate::error::Result;
use crate::sink::{Emission, SensorSink};
use crate::source::SignalFunction;

impl<'s, C: Clock, K: SensorSink + ?Sized> Scheduler<'s, C, K> {
    /// Returns `true` when the pass was stopped early.
    ///
    /// Without a period the loop emits back-to-back and relies on the clock
    /// advancing on its own.
    pub(super) fn play_function<F: SignalFunction + ?Sized>(
        &mut self,
        function: &F,
        period_ns: Option<i64>,
    ) -> Result<bool> {
        let group = function.group();
        let duration = function.duration_ns();
        let start = self.clock.now_ns();
        let mut deadline = start;

        loop {
            match period_ns {
                Some(period) => {
                    if !self.wait_until(deadline) {
                        return Ok(true);
                    }
                    deadline += period;
                }
                None => {
                    if self.stop.is_raised() {
                        return Ok(true);
                    }
                }
            }

            let offset_ns = self.clock.now_ns() - start;
            if offset_ns > duration {
                return Ok(false);
            }
            let value = function.value_at(offset_ns)?;
            self.deliver(Emission {
                group,
                value,
                offset_ns,
            })?;
        }
    }
}
