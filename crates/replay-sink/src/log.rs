//! Output log: `timestamp,ax,ay,az,nano` rows.

use crate::error::Result;
use csv::Writer;
use replay_core::Vec3;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Header row of every output log.
pub const LOG_HEADER: [&str; 5] = ["timestamp", "ax", "ay", "az", "nano"];

/// Milliseconds since the Unix epoch, 0 if the system clock is before it.
pub fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as i64)
}

/// CSV writer for emitted 3-vectors.
pub struct LogWriter<W: Write> {
    writer: Writer<W>,
    rows: u64,
}

impl LogWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> LogWriter<W> {
    /// Wrap `inner` and write the header row.
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(LOG_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_row(&mut self, timestamp_ms: i64, value: Vec3, nano: i64) -> Result<()> {
        let [x, y, z] = value;
        self.writer.write_record([
            timestamp_ms.to_string(),
            x.to_string(),
            y.to_string(),
            z.to_string(),
            nano.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}
