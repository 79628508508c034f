//! CSV sample source.

use crate::columns::ColumnMap;
use crate::error::{Error, Result};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use replay_core::{Axis, ChannelSet, Sample, SampleSource, TimeUnit};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Streams [`Sample`]s from a CSV recording, one row at a time.
///
/// The header is resolved once with [`ColumnMap::resolve`]. [`rewind`] reopens
/// the file and skips the header again.
///
/// [`rewind`]: SampleSource::rewind
pub struct CsvSource {
    path: PathBuf,
    reader: Reader<File>,
    headers: StringRecord,
    columns: ColumnMap,
    record: StringRecord,
}

impl CsvSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = Self::reader(&path)?;
        let headers = reader.headers()?.clone();
        let columns = ColumnMap::resolve(headers.iter())?;
        info!(
            path = %path.display(),
            available = ?columns.available(),
            unit = ?columns.time_column().1,
            "opened csv source"
        );
        Ok(Self {
            path,
            reader,
            headers,
            columns,
            record: StringRecord::new(),
        })
    }

    fn reader(path: &Path) -> Result<Reader<File>> {
        Ok(ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Read the next row, mapping I/O and parse failures to [`Error`].
    pub fn next_row(&mut self) -> Result<Option<Sample>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        let line = self.record.position().map_or(0, |p| p.line());

        let (time_index, _) = self.columns.time_column();
        let time = self.parse_time(time_index, line)?;
        let mut sample = Sample::new(time);
        for axis in Axis::ALL {
            if let Some(index) = self.columns.axis(axis) {
                sample.set(axis, self.parse_value(index, line)?);
            }
        }
        Ok(Some(sample))
    }

    fn cell(&self, index: usize) -> Option<&str> {
        self.record.get(index).filter(|cell| !cell.is_empty())
    }

    fn invalid(&self, index: usize, line: u64, value: &str) -> Error {
        Error::InvalidCell {
            line,
            column: self.headers.get(index).unwrap_or_default().to_string(),
            value: value.to_string(),
        }
    }

    /// Integer source time; integral floats such as `1000.0` are accepted.
    fn parse_time(&self, index: usize, line: u64) -> Result<i64> {
        let cell = self.cell(index).ok_or_else(|| self.invalid(index, line, ""))?;
        if let Ok(time) = cell.parse::<i64>() {
            return Ok(time);
        }
        match cell.parse::<f64>() {
            Ok(time) if time.is_finite() && time.fract() == 0.0 => Ok(time as i64),
            _ => Err(self.invalid(index, line, cell)),
        }
    }

    fn parse_value(&self, index: usize, line: u64) -> Result<Option<f64>> {
        match self.cell(index) {
            None => Ok(None),
            Some(cell) => cell
                .parse::<f64>()
                .map(Some)
                .map_err(|_| self.invalid(index, line, cell)),
        }
    }
}

impl SampleSource for CsvSource {
    fn time_unit(&self) -> TimeUnit {
        self.columns.time_column().1
    }

    fn available(&self) -> ChannelSet {
        self.columns.available()
    }

    fn next_sample(&mut self) -> replay_core::Result<Option<Sample>> {
        Ok(self.next_row()?)
    }

    fn rewind(&mut self) -> replay_core::Result<()> {
        // The reader skips the header row on its own
        self.reader = Self::reader(&self.path).map_err(replay_core::Error::from)?;
        debug!(path = %self.path.display(), "csv source rewound");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_core::ChannelGroup;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_rows_with_absent_cells() {
        let file = write_csv(
            "timestamp,ax,ay,az,gx,gy,gz\n\
             1000,0.1,0.2,9.8,1,2,3\n\
             1010,0.1,,9.8,1,2,3\n",
        );
        let mut source = CsvSource::open(file.path()).unwrap();
        assert_eq!(source.time_unit(), TimeUnit::Milliseconds);
        assert_eq!(
            source.available(),
            ChannelSet::only(ChannelGroup::Accelerometer).with(ChannelGroup::Gyroscope)
        );

        let first = source.next_sample().unwrap().unwrap();
        assert_eq!(first.source_time, 1000);
        assert_eq!(first.vector(ChannelGroup::Accelerometer), Some([0.1, 0.2, 9.8]));

        let second = source.next_sample().unwrap().unwrap();
        assert_eq!(second.get(Axis::AccelY), None);
        assert_eq!(second.vector(ChannelGroup::Accelerometer), None);
        assert_eq!(second.vector(ChannelGroup::Gyroscope), Some([1.0, 2.0, 3.0]));

        assert!(source.next_sample().unwrap().is_none());
    }

    #[test]
    fn test_rewind_skips_header() {
        let file = write_csv("Timestamp,ax,ay,az\n5,1,1,1\n6,2,2,2\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        while source.next_sample().unwrap().is_some() {}
        source.rewind().unwrap();
        assert_eq!(source.next_sample().unwrap().unwrap().source_time, 5);
    }

    #[test]
    fn test_nano_column_and_float_timestamps() {
        let file = write_csv("timestamp,ax,ay,az,nano\n1000.0,1,2,3,5000000\n1001.0,1,2,3,6000001\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        assert_eq!(source.time_unit(), TimeUnit::Nanoseconds);
        assert_eq!(source.next_sample().unwrap().unwrap().source_time, 5_000_000);
        assert_eq!(source.next_sample().unwrap().unwrap().source_time, 6_000_001);
    }

    #[test]
    fn test_unparsable_cell_names_line_and_column() {
        let file = write_csv("timestamp,ax,ay,az\n0,1,2,3\n10,1,oops,3\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        assert!(source.next_row().unwrap().is_some());
        match source.next_row() {
            Err(Error::InvalidCell {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "ay");
                assert_eq!(value, "oops");
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }

        let file = write_csv("timestamp,ax,ay,az\n10.5,1,2,3\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        assert!(matches!(source.next_row(), Err(Error::InvalidCell { .. })));
    }

    #[test]
    fn test_source_errors_surface_through_core() {
        let file = write_csv("timestamp,ax,ay,az\nnope,1,2,3\n");
        let mut source = CsvSource::open(file.path()).unwrap();
        assert!(matches!(
            source.next_sample(),
            Err(replay_core::Error::Source(_))
        ));
    }

    #[test]
    fn test_missing_timestamp_column() {
        let file = write_csv("time,ax,ay,az\n0,1,2,3\n");
        assert!(matches!(
            CsvSource::open(file.path()),
            Err(Error::MissingTimestamp(_))
        ));
    }
}
