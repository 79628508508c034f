//! Real-time replay runtime for motion-sensor samples.
//!
//! # Primary API
//!
//! - [`Scheduler`]: paces samples into a [`SensorSink`] in exact, interpolated or
//!   function mode
//! - [`SlidingWindow`] / [`VectorInterpolant`]: four-sample spline reconstruction
//! - [`ClockMapping`] / [`Clock`]: source-time to real-time conversion
//! - [`SampleSource`] / [`SignalFunction`]: streamed and continuous inputs
//! - [`PlaybackConfig`]: requested channels, repetitions, output period
//!
//! # Example
//!
//! ```ignore
//! use replay_core::*;
//!
//! let config = PlaybackConfig { period_ms: Some(5.0), ..Default::default() };
//! let mut sink = MemorySink::new();
//! let report = Scheduler::from_config(SystemClock::new(), &mut sink, &config)
//!     .run(&mut source)?;
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod interp;
pub mod lockfree;
pub mod scheduler;
pub mod sink;
pub mod source;
pub mod types;

pub use clock::{Clock, ClockMapping, ManualClock, SystemClock};
pub use config::{PlaybackConfig, PlaybackMode};
pub use error::{Error, Result, SinkError, SourceError};
pub use interp::{InterpolantKind, PiecewiseCubic, SlidingWindow, VectorInterpolant, WINDOW_LEN};
pub use lockfree::{AtomicDouble, AtomicFlag};
pub use scheduler::{
    resolve_channels, PlaybackMetrics, PlaybackMetricsSnapshot, RunReport, Scheduler, StopSignal,
};
pub use sink::{Emission, MemorySink, SensorSink};
pub use source::{MemorySource, SampleSource, SignalFunction};
pub use types::{Axis, ChannelGroup, ChannelSet, Sample, TimeUnit, Vec3};
