//! Sample sources for sensor replay.
//!
//! - [`CsvSource`]: streamed CSV recordings with alias-based column resolution
//! - [`FileModel`]: whole-recording interpolant played as a continuous signal
//! - [`WaveModel`]: seeded sum-of-sines accelerometer
//! - [`SampledSource`]: any continuous signal sampled into a stream

pub mod columns;
mod csv_source;
pub mod error;
mod file_model;
pub mod model;
mod sampled;

pub use columns::{normalize, ColumnMap};
pub use csv_source::CsvSource;
pub use error::{Error, Result};
pub use file_model::FileModel;
pub use model::{Magnitude, Wave, WaveModel, DEFAULT_SEED, STANDARD_GRAVITY};
pub use sampled::SampledSource;
