//! Header normalization and column role resolution.
//!
//! Headers are compared after lowercasing and stripping everything outside
//! `a..z`, so `Accelerometer X`, `accelerometer_x` and `ACCELEROMETERX` are the
//! same column.

use crate::error::{Error, Result};
use replay_core::{Axis, ChannelGroup, ChannelSet, TimeUnit};
use tracing::debug;

/// Lowercase and drop every character outside `a..z`.
pub fn normalize(header: &str) -> String {
    header
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Normalized names accepted for each axis.
pub fn aliases(axis: Axis) -> &'static [&'static str] {
    match axis {
        Axis::AccelX => &["ax", "accelerometerx", "accelerationx"],
        Axis::AccelY => &["ay", "accelerometery", "accelerationy"],
        Axis::AccelZ => &["az", "accelerometerz", "accelerationz"],
        Axis::GyroX => &["gx", "gyroscopex", "rotationx"],
        Axis::GyroY => &["gy", "gyroscopey", "rotationy"],
        Axis::GyroZ => &["gz", "gyroscopez", "rotationz"],
        Axis::MagX => &["mx", "magnetometerx"],
        Axis::MagY => &["my", "magnetometery"],
        Axis::MagZ => &["mz", "magnetometerz"],
    }
}

/// Column index of every role found in a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub timestamp: usize,
    /// High-precision time column, preferred over `timestamp` when present.
    pub nano: Option<usize>,
    axes: [Option<usize>; Axis::COUNT],
}

impl ColumnMap {
    /// Resolve roles once, at stream open. First matching header wins.
    pub fn resolve<'a, I>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let raw: Vec<&str> = headers.into_iter().collect();
        let normalized: Vec<String> = raw.iter().map(|h| normalize(h)).collect();

        let nano = normalized.iter().position(|h| h.starts_with("nano"));
        let timestamp = normalized
            .iter()
            .enumerate()
            .find(|(i, h)| h.contains("timestamp") && Some(*i) != nano)
            .map(|(i, _)| i)
            .ok_or_else(|| Error::MissingTimestamp(raw.iter().map(|h| h.to_string()).collect()))?;

        let mut axes = [None; Axis::COUNT];
        for axis in Axis::ALL {
            axes[axis.index()] = normalized
                .iter()
                .position(|h| aliases(axis).contains(&h.as_str()));
        }

        let map = Self {
            timestamp,
            nano,
            axes,
        };
        debug!(timestamp, ?nano, available = ?map.available(), "resolved csv columns");
        Ok(map)
    }

    pub fn axis(&self, axis: Axis) -> Option<usize> {
        self.axes[axis.index()]
    }

    /// Groups with all three axes resolved.
    pub fn available(&self) -> ChannelSet {
        ChannelGroup::ALL
            .into_iter()
            .filter(|group| group.axes().iter().all(|axis| self.axis(*axis).is_some()))
            .collect()
    }

    /// Column carrying source time, and its unit.
    pub fn time_column(&self) -> (usize, TimeUnit) {
        match self.nano {
            Some(index) => (index, TimeUnit::Nanoseconds),
            None => (self.timestamp, TimeUnit::Milliseconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Accelerometer X"), "accelerometerx");
        assert_eq!(normalize("gyro_x (rad/s)"), "gyroxrads");
        assert_eq!(normalize(" Time-Stamp[ms] "), "timestampms");
        assert_eq!(normalize("42"), "");
    }

    #[test]
    fn test_resolve_aliases() {
        let map = ColumnMap::resolve([
            "Timestamp (ms)",
            "Acceleration X",
            "acceleration_y",
            "AZ",
            "rotation x",
            "gy",
            "gz",
        ])
        .unwrap();
        assert_eq!(map.timestamp, 0);
        assert_eq!(map.axis(Axis::AccelX), Some(1));
        assert_eq!(map.axis(Axis::AccelZ), Some(3));
        assert_eq!(map.axis(Axis::GyroX), Some(4));
        assert_eq!(map.axis(Axis::MagX), None);
        assert_eq!(
            map.available(),
            ChannelSet::only(ChannelGroup::Accelerometer).with(ChannelGroup::Gyroscope)
        );
        assert_eq!(map.time_column(), (0, TimeUnit::Milliseconds));
    }

    #[test]
    fn test_partial_group_unavailable() {
        let map = ColumnMap::resolve(["timestamp", "ax", "ay"]).unwrap();
        assert_eq!(map.axis(Axis::AccelX), Some(1));
        assert!(map.available().is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let map = ColumnMap::resolve(["ts_timestamp", "ax", "accelerationx", "ay", "az"]).unwrap();
        assert_eq!(map.axis(Axis::AccelX), Some(1));
    }

    #[test]
    fn test_nano_column_preferred() {
        let map = ColumnMap::resolve(["timestamp", "ax", "ay", "az", "nano"]).unwrap();
        assert_eq!(map.nano, Some(4));
        assert_eq!(map.time_column(), (4, TimeUnit::Nanoseconds));

        // A nano timestamp header is not taken as the ms column
        let map = ColumnMap::resolve(["nanotimestamp", "timestamp", "ax"]).unwrap();
        assert_eq!(map.timestamp, 1);
        assert_eq!(map.nano, Some(0));
    }

    #[test]
    fn test_missing_timestamp() {
        assert!(matches!(
            ColumnMap::resolve(["time", "ax", "ay", "az"]),
            Err(Error::MissingTimestamp(headers)) if headers.len() == 4
        ));
    }
}
