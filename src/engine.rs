//! ReplayEngine that coordinates sources, the scheduler and sinks

use crate::{ReplayConfig, ReplayEngineBuilder, Result};
use replay_core::{
    resolve_channels, ChannelGroup, Clock, PlaybackMetrics, PlaybackMetricsSnapshot, PlaybackMode,
    RunReport, SampleSource, Scheduler, SensorSink, SignalFunction, StopSignal, SystemClock,
};
use replay_sink::{EmulatorConsole, LogWriter, RecordingSink};
use replay_source::{CsvSource, FileModel};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Aggregate of every playback pass of one engine call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub passes: Vec<RunReport>,
    /// Engine-wide counters after the call, all calls included.
    pub metrics: PlaybackMetricsSnapshot,
}

impl ReplaySummary {
    pub fn emissions(&self) -> u64 {
        self.passes.iter().map(RunReport::emissions).sum()
    }

    pub fn stopped(&self) -> bool {
        self.passes.iter().any(|pass| pass.stopped)
    }

    /// Emissions per second over all passes.
    pub fn achieved_rate_hz(&self) -> f64 {
        let elapsed: i64 = self.passes.iter().map(|pass| pass.elapsed_ns).sum();
        if elapsed <= 0 {
            0.0
        } else {
            self.emissions() as f64 * 1e9 / elapsed as f64
        }
    }
}

/// Main replay engine.
///
/// Owns the configuration, the clock, the stop signal and the metrics shared by
/// every run. Sinks are passed in per call, so the caller decides how long a
/// console connection lives.
///
/// # Example
///
/// ```ignore
/// use sensor_replay::prelude::*;
///
/// let engine = ReplayEngine::builder()
///     .config(ReplayConfig::load("replay.toml")?)
///     .build()?;
///
/// let summary = engine.replay_file("walk.csv", None)?;
/// println!("{} emissions", summary.emissions());
/// ```
pub struct ReplayEngine<C: Clock = SystemClock> {
    config: ReplayConfig,
    clock: C,
    stop: StopSignal,
    metrics: Arc<PlaybackMetrics>,
}

impl ReplayEngine<SystemClock> {
    /// Create a new engine builder
    pub fn builder() -> ReplayEngineBuilder<SystemClock> {
        ReplayEngineBuilder::default()
    }
}

impl<C: Clock> ReplayEngine<C> {
    pub(crate) fn from_parts(config: ReplayConfig, clock: C, stop: StopSignal) -> Self {
        Self {
            config,
            clock,
            stop,
            metrics: Arc::new(PlaybackMetrics::new()),
        }
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handle that stops a running call from another thread.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn metrics(&self) -> &Arc<PlaybackMetrics> {
        &self.metrics
    }

    fn scheduler<'s, K: SensorSink + ?Sized>(
        &self,
        sink: &'s mut K,
        mode: PlaybackMode,
    ) -> Scheduler<'s, &C, K> {
        let playback = &self.config.playback;
        Scheduler::new(&self.clock, sink, mode, playback.channels)
            .with_poll_interval_ns(playback.poll_interval_ns())
            .with_stop_signal(self.stop.clone())
            .with_metrics(self.metrics.clone())
    }

    /// Replay `source` into `sink` for every configured repetition.
    ///
    /// Channels are narrowed to what the source provides before the first
    /// emission. Each repetition rewinds the source and pins a fresh clock
    /// mapping.
    pub fn run<S, K>(&self, source: &mut S, sink: &mut K) -> Result<ReplaySummary>
    where
        S: SampleSource + ?Sized,
        K: SensorSink + ?Sized,
    {
        let playback = &self.config.playback;
        let mode = playback.mode();
        let channels = resolve_channels(playback.channels, source.available(), mode)?;
        let repetitions = playback.repetitions;
        info!(?mode, ?channels, repetitions, "starting replay");

        let mut scheduler = self.scheduler(sink, mode).with_channels(channels);
        let mut passes = Vec::with_capacity(repetitions as usize);
        for pass in 1..=repetitions {
            if pass > 1 {
                source.rewind()?;
            }
            let report = scheduler.run(source)?;
            info!(
                pass,
                repetitions,
                emissions = report.emissions(),
                skipped = report.metrics.skipped,
                failures = report.metrics.failures,
                "replay pass complete"
            );
            let stopped = report.stopped;
            passes.push(report);
            if stopped {
                info!("replay stopped");
                break;
            }
        }
        Ok(self.summary(passes))
    }

    /// Play a continuous function for every configured repetition, at the
    /// configured period or back-to-back when none is set.
    pub fn run_function<F, K>(&self, function: &F, sink: &mut K) -> Result<ReplaySummary>
    where
        F: SignalFunction + ?Sized,
        K: SensorSink + ?Sized,
    {
        let playback = &self.config.playback;
        let period_ns = playback.period_ns();
        let repetitions = playback.repetitions;
        info!(group = %function.group(), ?period_ns, repetitions, "starting function playback");

        let mut scheduler = self.scheduler(sink, playback.mode());
        let mut passes = Vec::with_capacity(repetitions as usize);
        for pass in 1..=repetitions {
            let report = scheduler.run_function(function, period_ns)?;
            info!(
                pass,
                repetitions,
                emissions = report.emissions(),
                rate_hz = report.achieved_rate_hz(),
                "function pass complete"
            );
            let stopped = report.stopped;
            passes.push(report);
            if stopped {
                break;
            }
        }
        Ok(self.summary(passes))
    }

    fn summary(&self, passes: Vec<RunReport>) -> ReplaySummary {
        let summary = ReplaySummary {
            passes,
            metrics: self.metrics.snapshot(),
        };
        if summary.metrics.late_wakeups > 0 {
            info!(
                late = summary.metrics.late_wakeups,
                max_lag_ms = summary.metrics.max_lag_ms,
                mean_lag_ms = summary.metrics.mean_lag_ms(),
                "pacing fell behind"
            );
        }
        summary
    }

    /// Open the configured console, optionally log emissions of `logged` to
    /// `log`, run `body`, then close the console whatever the outcome.
    pub fn with_console<T>(
        &self,
        log: Option<&Path>,
        logged: ChannelGroup,
        body: impl FnOnce(&mut dyn SensorSink) -> Result<T>,
    ) -> Result<T> {
        let mut console = EmulatorConsole::connect(&self.config.console, self.config.playback.verbose)?;
        let outcome = match log {
            Some(path) => {
                let mut recorder = RecordingSink::new(&mut console, LogWriter::create(path)?, logged);
                let outcome = body(&mut recorder);
                info!(path = %path.display(), rows = recorder.log().rows(), "output log written");
                outcome
            }
            None => body(&mut console),
        };
        let closed = console.close();
        let value = outcome?;
        closed?;
        Ok(value)
    }

    /// Replay a CSV recording into the configured console.
    pub fn replay_file(&self, path: impl AsRef<Path>, log: Option<&Path>) -> Result<ReplaySummary> {
        let mut source = CsvSource::open(path)?;
        let logged = self.config.playback.interpolate;
        self.with_console(log, logged, |sink| self.run(&mut source, sink))
    }

    /// Play a whole recording as one interpolated function into the console.
    pub fn play_file(&self, path: impl AsRef<Path>, log: Option<&Path>) -> Result<ReplaySummary> {
        let model = FileModel::load(path, self.config.playback.kind)?;
        self.with_console(log, model.group(), |sink| self.run_function(&model, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_core::{ManualClock, MemorySink, MemorySource, Sample, TimeUnit};

    fn engine(repetitions: u32) -> ReplayEngine<ManualClock> {
        let mut config = ReplayConfig::default();
        config.playback.repetitions = repetitions;
        ReplayEngine::builder()
            .config(config)
            .clock(ManualClock::new())
            .build()
            .unwrap()
    }

    #[test]
    fn test_repetitions_rewind_source() {
        let engine = engine(3);
        let mut source = MemorySource::new(
            TimeUnit::Milliseconds,
            (0..4)
                .map(|i| Sample::with_group(i * 10, ChannelGroup::Gyroscope, [i as f64; 3]))
                .collect(),
        );
        let mut sink = MemorySink::new();
        let summary = engine.run(&mut source, &mut sink).unwrap();
        assert_eq!(summary.passes.len(), 3);
        assert_eq!(summary.emissions(), 12);
        assert_eq!(summary.metrics.emissions, 12);
        assert!(!summary.stopped());
    }

    #[test]
    fn test_stop_signal_ends_repetitions() {
        let engine = engine(5);
        engine.stop_signal().raise();
        let mut source = MemorySource::new(
            TimeUnit::Milliseconds,
            vec![Sample::with_group(0, ChannelGroup::Accelerometer, [0.0; 3])],
        );
        let mut sink = MemorySink::new();
        let summary = engine.run(&mut source, &mut sink).unwrap();
        assert_eq!(summary.passes.len(), 1);
        assert!(summary.stopped());
        assert_eq!(summary.emissions(), 0);
    }

    #[test]
    fn test_summary_rate() {
        let summary = ReplaySummary {
            passes: vec![
                RunReport {
                    metrics: PlaybackMetricsSnapshot {
                        emissions: 10,
                        ..Default::default()
                    },
                    elapsed_ns: 100_000_000,
                    stopped: false,
                },
                RunReport {
                    metrics: PlaybackMetricsSnapshot {
                        emissions: 30,
                        ..Default::default()
                    },
                    elapsed_ns: 300_000_000,
                    stopped: false,
                },
            ],
            metrics: PlaybackMetricsSnapshot::default(),
        };
        assert_eq!(summary.emissions(), 40);
        assert_eq!(summary.achieved_rate_hz(), 100.0);
    }
}
