//! Sample data model: axes, channel groups, timestamped samples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3-axis reading (x, y, z).
pub type Vec3 = [f64; 3];

/// A logical 3-axis sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelGroup {
    Accelerometer,
    Gyroscope,
    Magnetometer,
}

impl ChannelGroup {
    pub const ALL: [ChannelGroup; 3] = [
        ChannelGroup::Accelerometer,
        ChannelGroup::Gyroscope,
        ChannelGroup::Magnetometer,
    ];

    /// The three axes of this group, in x/y/z order.
    pub fn axes(self) -> [Axis; 3] {
        match self {
            ChannelGroup::Accelerometer => [Axis::AccelX, Axis::AccelY, Axis::AccelZ],
            ChannelGroup::Gyroscope => [Axis::GyroX, Axis::GyroY, Axis::GyroZ],
            ChannelGroup::Magnetometer => [Axis::MagX, Axis::MagY, Axis::MagZ],
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            ChannelGroup::Accelerometer => 0b001,
            ChannelGroup::Gyroscope => 0b010,
            ChannelGroup::Magnetometer => 0b100,
        }
    }
}

impl fmt::Display for ChannelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelGroup::Accelerometer => "accelerometer",
            ChannelGroup::Gyroscope => "gyroscope",
            ChannelGroup::Magnetometer => "magnetometer",
        };
        f.write_str(name)
    }
}

/// One axis of one channel group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    AccelX,
    AccelY,
    AccelZ,
    GyroX,
    GyroY,
    GyroZ,
    MagX,
    MagY,
    MagZ,
}

impl Axis {
    pub const COUNT: usize = 9;

    pub const ALL: [Axis; Axis::COUNT] = [
        Axis::AccelX,
        Axis::AccelY,
        Axis::AccelZ,
        Axis::GyroX,
        Axis::GyroY,
        Axis::GyroZ,
        Axis::MagX,
        Axis::MagY,
        Axis::MagZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn group(self) -> ChannelGroup {
        match self {
            Axis::AccelX | Axis::AccelY | Axis::AccelZ => ChannelGroup::Accelerometer,
            Axis::GyroX | Axis::GyroY | Axis::GyroZ => ChannelGroup::Gyroscope,
            Axis::MagX | Axis::MagY | Axis::MagZ => ChannelGroup::Magnetometer,
        }
    }
}

/// Set of enabled channel groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ChannelSet(u8);

impl ChannelSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b111)
    }

    pub fn only(group: ChannelGroup) -> Self {
        Self(group.bit())
    }

    pub fn contains(self, group: ChannelGroup) -> bool {
        self.0 & group.bit() != 0
    }

    pub fn insert(&mut self, group: ChannelGroup) {
        self.0 |= group.bit();
    }

    pub fn remove(&mut self, group: ChannelGroup) {
        self.0 &= !group.bit();
    }

    pub fn with(mut self, group: ChannelGroup) -> Self {
        self.insert(group);
        self
    }

    pub fn intersection(self, other: ChannelSet) -> ChannelSet {
        Self(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enabled groups in accelerometer, gyroscope, magnetometer order.
    pub fn iter(self) -> impl Iterator<Item = ChannelGroup> {
        ChannelGroup::ALL
            .into_iter()
            .filter(move |group| self.contains(*group))
    }
}

impl FromIterator<ChannelGroup> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = ChannelGroup>>(iter: I) -> Self {
        let mut set = ChannelSet::empty();
        for group in iter {
            set.insert(group);
        }
        set
    }
}

impl Serialize for ChannelSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ChannelSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let groups = Vec::<ChannelGroup>::deserialize(deserializer)?;
        Ok(groups.into_iter().collect())
    }
}

/// Unit of the source clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Nanoseconds per source unit.
    pub fn nanos_per_unit(self) -> i64 {
        match self {
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Nanoseconds => 1,
        }
    }
}

/// A timestamped multi-axis sample.
///
/// Axes are `None` when their column could not be located or the cell was empty.
/// Absent values are never replaced with zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub source_time: i64,
    axes: [Option<f64>; Axis::COUNT],
}

impl Sample {
    pub fn new(source_time: i64) -> Self {
        Self {
            source_time,
            axes: [None; Axis::COUNT],
        }
    }

    /// Build a sample carrying one complete channel group.
    pub fn with_group(source_time: i64, group: ChannelGroup, value: Vec3) -> Self {
        let mut sample = Self::new(source_time);
        sample.set_group(group, value);
        sample
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> Option<f64> {
        self.axes[axis.index()]
    }

    #[inline]
    pub fn set(&mut self, axis: Axis, value: Option<f64>) {
        self.axes[axis.index()] = value;
    }

    pub fn set_group(&mut self, group: ChannelGroup, value: Vec3) {
        for (axis, v) in group.axes().into_iter().zip(value) {
            self.set(axis, Some(v));
        }
    }

    /// The group's 3-vector, only when all three axes are present.
    pub fn vector(&self, group: ChannelGroup) -> Option<Vec3> {
        let [x, y, z] = group.axes();
        Some([self.get(x)?, self.get(y)?, self.get(z)?])
    }
}
