//! Tolerance constants for replay tests.

/// Floating point rounding errors. Use where the result is mathematically
/// exact, e.g. a spline reproducing linear data.
pub const FLOAT_EPSILON: f64 = 1e-9;

/// Values that went through a CSV file as decimal text.
pub const TEXT_EPSILON: f64 = 1e-6;

/// Four-knot spline against a slow sine sampled at 100 Hz.
pub const SPLINE_EPSILON: f64 = 1e-2;
