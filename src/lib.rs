//! # Sensor Replay - Real-time motion sensor playback
//!
//! Replays recorded or generated motion-sensor samples into a virtual device in
//! real time, either at their recorded timestamps or resampled at a fixed
//! period through a sliding-window spline.
//!
//! ## Architecture
//!
//! Sensor Replay is an umbrella crate that coordinates:
//! - **replay-core** - Scheduler, clock mapping, sliding-window interpolation
//! - **replay-source** - CSV recordings, whole-file models, generated signals
//! - **replay-sink** - Emulator console, output log, recording decorator
//!
//! ## Quick Start
//!
//! ```ignore
//! use sensor_replay::prelude::*;
//!
//! let mut config = ReplayConfig::default();
//! config.playback.period_ms = Some(5.0);
//!
//! let engine = ReplayEngine::builder().config(config).build()?;
//! let summary = engine.replay_file("walk.csv", Some(Path::new("out.csv")))?;
//! ```

/// Re-export of replay-core for direct access
pub use replay_core as core;

/// Re-export of replay-source
pub use replay_source as source;

/// Re-export of replay-sink
pub use replay_sink as sink;

pub use replay_core::{
    // Data
    Axis,
    ChannelGroup,
    ChannelSet,
    // Time
    Clock,
    ClockMapping,
    Emission,
    InterpolantKind,
    ManualClock,
    MemorySink,
    MemorySource,
    // Playback
    PlaybackConfig,
    PlaybackMetrics,
    PlaybackMetricsSnapshot,
    PlaybackMode,
    RunReport,
    Sample,
    SampleSource,
    Scheduler,
    SensorSink,
    SignalFunction,
    SinkError,
    SlidingWindow,
    StopSignal,
    SystemClock,
    TimeUnit,
    Vec3,
};

pub use replay_sink::{ConsoleConfig, EmulatorConsole, LogWriter, RecordingSink};
pub use replay_source::{CsvSource, FileModel, Magnitude, SampledSource, WaveModel};

mod builder;
mod config;
mod engine;
pub mod error;
mod resample;

pub use builder::ReplayEngineBuilder;
pub use config::ReplayConfig;
pub use engine::{ReplayEngine, ReplaySummary};
pub use error::{Error, Result};
pub use resample::resample;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{ReplayConfig, ReplayEngine, ReplayEngineBuilder, ReplaySummary};

    pub use crate::core::{
        ChannelGroup, ChannelSet, InterpolantKind, PlaybackConfig, SampleSource, SensorSink,
        SignalFunction, StopSignal,
    };

    pub use crate::sink::{ConsoleConfig, LogWriter};
    pub use crate::source::{CsvSource, FileModel, Magnitude, WaveModel};

    pub use std::path::Path;
}
