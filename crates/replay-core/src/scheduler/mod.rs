//! Real-time playback scheduler.
//!
//! A [`Scheduler`] pins a [`ClockMapping`](crate::clock::ClockMapping) at the
//! start of every pass and paces emissions into a [`SensorSink`] against it.
//! Three loops share the same pacing and delivery machinery:
//!
//! - exact mode: every sample at its own timestamp
//! - interpolated mode: a sliding-window spline sampled at a fixed period
//! - function mode: a continuous [`SignalFunction`] sampled at a fixed period
//!   or back-to-back
//!
//! The only blocking point is [`Scheduler::wait_until`], which also polls the
//! [`StopSignal`].

mod exact;
mod function;
mod interpolated;
mod metrics;
mod stop;

pub use metrics::{PlaybackMetrics, PlaybackMetricsSnapshot};
pub use stop::StopSignal;

use crate::clock::Clock;
use crate::config::{PlaybackConfig, PlaybackMode};
use crate::error::{Error, Result};
use crate::sink::{Emission, SensorSink};
use crate::source::{SampleSource, SignalFunction};
use crate::types::ChannelSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one playback pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Counters accumulated during this pass only.
    pub metrics: PlaybackMetricsSnapshot,
    /// Real time spent in the pass.
    pub elapsed_ns: i64,
    /// The pass ended because the stop signal was raised.
    pub stopped: bool,
}

impl RunReport {
    pub fn emissions(&self) -> u64 {
        self.metrics.emissions
    }

    /// Emissions per second of real time.
    pub fn achieved_rate_hz(&self) -> f64 {
        if self.elapsed_ns <= 0 {
            0.0
        } else {
            self.metrics.emissions as f64 * 1e9 / self.elapsed_ns as f64
        }
    }
}

/// Narrow `requested` to what the input provides.
///
/// Every requested group missing from `available` is logged and dropped.
/// Interpolated mode fails when its group is missing; otherwise the call fails
/// only when nothing is left.
pub fn resolve_channels(
    requested: ChannelSet,
    available: ChannelSet,
    mode: PlaybackMode,
) -> Result<ChannelSet> {
    for group in requested.iter().filter(|g| !available.contains(*g)) {
        warn!(%group, "channel group not fully present in the input, disabled for this run");
    }
    if let PlaybackMode::Interpolated { group, .. } = mode {
        if !available.contains(group) {
            return Err(Error::ChannelUnavailable(group));
        }
        return Ok(ChannelSet::only(group));
    }
    let enabled = requested.intersection(available);
    if enabled.is_empty() {
        return Err(Error::NoChannels);
    }
    Ok(enabled)
}

/// Paces samples from a source into a sink.
pub struct Scheduler<'s, C: Clock, K: SensorSink + ?Sized> {
    clock: C,
    sink: &'s mut K,
    mode: PlaybackMode,
    channels: ChannelSet,
    poll_interval_ns: i64,
    stop: StopSignal,
    metrics: Arc<PlaybackMetrics>,
}

impl<'s, C: Clock, K: SensorSink + ?Sized> Scheduler<'s, C, K> {
    pub fn new(clock: C, sink: &'s mut K, mode: PlaybackMode, channels: ChannelSet) -> Self {
        Self {
            clock,
            sink,
            mode,
            channels,
            poll_interval_ns: 50_000_000,
            stop: StopSignal::new(),
            metrics: Arc::new(PlaybackMetrics::new()),
        }
    }

    /// Scheduler for a validated config; channels are the requested ones.
    pub fn from_config(clock: C, sink: &'s mut K, config: &PlaybackConfig) -> Self {
        Self::new(clock, sink, config.mode(), config.channels)
            .with_poll_interval_ns(config.poll_interval_ns())
    }

    pub fn with_channels(mut self, channels: ChannelSet) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_poll_interval_ns(mut self, poll_interval_ns: i64) -> Self {
        self.poll_interval_ns = poll_interval_ns.max(1);
        self
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<PlaybackMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<PlaybackMetrics> {
        &self.metrics
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Play `source` once from its current position.
    pub fn run<S: SampleSource + ?Sized>(&mut self, source: &mut S) -> Result<RunReport> {
        let channels = resolve_channels(self.channels, source.available(), self.mode)?;
        match self.mode {
            PlaybackMode::Exact => {
                debug!(?channels, "exact playback pass");
                self.reported(|s| s.play_exact(source, channels))
            }
            PlaybackMode::Interpolated {
                group,
                period_ns,
                kind,
            } => {
                debug!(%group, period_ns, %kind, "interpolated playback pass");
                self.reported(|s| s.play_interpolated(source, group, period_ns, kind))
            }
        }
    }

    /// Play a continuous function once, every `period_ns` or back-to-back
    /// when `None`.
    pub fn run_function<F: SignalFunction + ?Sized>(
        &mut self,
        function: &F,
        period_ns: Option<i64>,
    ) -> Result<RunReport> {
        if let Some(period) = period_ns {
            if period <= 0 {
                return Err(Error::InvalidConfig(format!(
                    "function playback period must be positive, got {period} ns"
                )));
            }
        }
        debug!(group = %function.group(), duration_ns = function.duration_ns(), ?period_ns, "function playback pass");
        self.reported(|s| s.play_function(function, period_ns))
    }

    /// Block until `deadline_ns`, in slices of at most the poll interval.
    ///
    /// Returns `false` as soon as the stop signal is seen. A wake-up past the
    /// deadline is recorded as lag.
    pub fn wait_until(&self, deadline_ns: i64) -> bool {
        loop {
            if self.stop.is_raised() {
                return false;
            }
            let now = self.clock.now_ns();
            if now >= deadline_ns {
                self.metrics.record_lag(now - deadline_ns);
                return true;
            }
            self.clock
                .sleep_until_ns(deadline_ns.min(now + self.poll_interval_ns));
        }
    }

    /// Hand one value to the sink. Only a lost transport is an error.
    fn deliver(&mut self, emission: Emission) -> Result<()> {
        match self.sink.emit(&emission) {
            Ok(ack) => {
                self.metrics.record_emission();
                if let Some(ack) = ack {
                    debug!(group = %emission.group, %ack, "acknowledged");
                }
                Ok(())
            }
            Err(crate::SinkError::Unavailable(reason)) => Err(Error::SinkUnavailable(reason)),
            Err(e) => {
                self.metrics.record_failure();
                warn!(group = %emission.group, offset_ns = emission.offset_ns, error = %e, "emission skipped");
                Ok(())
            }
        }
    }

    /// Run one pass body and turn its counters into a [`RunReport`].
    /// The sink is flushed whether or not the body succeeded.
    fn reported<F>(&mut self, body: F) -> Result<RunReport>
    where
        F: FnOnce(&mut Self) -> Result<bool>,
    {
        let before = self.metrics.snapshot();
        let started = self.clock.now_ns();
        let outcome = body(self);
        let flushed = self.sink.flush();
        let stopped = outcome?;
        match flushed {
            Err(crate::SinkError::Unavailable(reason)) => return Err(Error::SinkUnavailable(reason)),
            Err(e) => warn!(error = %e, "sink flush failed"),
            Ok(()) => {}
        }
        Ok(RunReport {
            metrics: self.metrics.snapshot().since(&before),
            elapsed_ns: self.clock.now_ns() - started,
            stopped,
        })
    }
}
