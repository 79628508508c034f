//! Offline resampling of a signal into an output log.

use crate::Result;
use replay_core::{Error as CoreError, SignalFunction};
use replay_sink::LogWriter;
use std::io::Write;
use tracing::debug;

/// Evaluate `function` every `1 / frequency_hz` seconds from offset zero up to,
/// but not including, its duration, writing one log row per point.
///
/// Rows carry the offset both in milliseconds (`timestamp`) and in nanoseconds
/// (`nano`). Returns the number of rows written.
pub fn resample<F, W>(function: &F, frequency_hz: f64, log: &mut LogWriter<W>) -> Result<u64>
where
    F: SignalFunction + ?Sized,
    W: Write,
{
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(CoreError::InvalidConfig(format!(
            "resampling frequency {frequency_hz} Hz must be positive"
        ))
        .into());
    }
    let period_ns = (1e9 / frequency_hz).round() as i64;
    if period_ns <= 0 {
        return Err(CoreError::InvalidConfig(format!(
            "resampling frequency {frequency_hz} Hz is above clock resolution"
        ))
        .into());
    }

    let duration_ns = function.duration_ns();
    let mut rows = 0u64;
    let mut offset_ns = 0i64;
    while offset_ns < duration_ns {
        let value = function.value_at(offset_ns)?;
        log.write_row(offset_ns / 1_000_000, value, offset_ns)?;
        rows += 1;
        offset_ns += period_ns;
    }
    log.flush()?;
    debug!(rows, period_ns, duration_ns, "resampled");
    Ok(rows)
}
