//! Affine source-time to real-time mapping.

use crate::types::TimeUnit;

/// A pinned `(source_time₀, real_time₀)` pair.
///
/// `real = real₀ + (source − source₀) · ns_per_unit`. Pinned once per playback
/// pass and never moved afterwards; there is no drift correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockMapping {
    source_origin: i64,
    real_origin_ns: i64,
    nanos_per_unit: i64,
}

impl ClockMapping {
    pub fn pin(source_origin: i64, real_origin_ns: i64, unit: TimeUnit) -> Self {
        Self {
            source_origin,
            real_origin_ns,
            nanos_per_unit: unit.nanos_per_unit(),
        }
    }

    pub fn source_origin(&self) -> i64 {
        self.source_origin
    }

    pub fn real_origin_ns(&self) -> i64 {
        self.real_origin_ns
    }

    /// Real-time instant (clock nanoseconds) of a source timestamp.
    #[inline]
    pub fn to_real_ns(&self, source_time: i64) -> i64 {
        self.real_origin_ns + (source_time - self.source_origin) * self.nanos_per_unit
    }

    /// Seconds between the real origin and `real_ns`.
    ///
    /// Interpolant knots and evaluation points both go through this, so equal
    /// instants compare equal.
    #[inline]
    pub fn offset_secs(&self, real_ns: i64) -> f64 {
        (real_ns - self.real_origin_ns) as f64 / 1e9
    }

    /// Shorthand for `offset_secs(to_real_ns(source_time))`.
    #[inline]
    pub fn source_offset_secs(&self, source_time: i64) -> f64 {
        self.offset_secs(self.to_real_ns(source_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millisecond_mapping() {
        let mapping = ClockMapping::pin(1_000, 50_000_000, TimeUnit::Milliseconds);
        assert_eq!(mapping.to_real_ns(1_000), 50_000_000);
        assert_eq!(mapping.to_real_ns(1_010), 60_000_000);
        // Samples before the anchor map to the past
        assert_eq!(mapping.to_real_ns(990), 40_000_000);
        assert_eq!(mapping.source_offset_secs(1_250), 0.25);
    }

    #[test]
    fn test_nanosecond_mapping_is_identity_scale() {
        let mapping = ClockMapping::pin(7, 0, TimeUnit::Nanoseconds);
        assert_eq!(mapping.to_real_ns(1_000_007), 1_000_000);
        assert_eq!(mapping.offset_secs(-500_000_000), -0.5);
    }
}
