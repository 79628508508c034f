//! Test helpers and fixtures for sensor replay integration tests
//!
//! Engines run on a [`ManualClock`] so pacing is deterministic and no test
//! ever sleeps. Recordings are written to a temporary directory as CSV.
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-9): exact reconstruction
//! - `TEXT_EPSILON` (1e-6): values that went through CSV text
//! - `SPLINE_EPSILON` (1e-2): spline against a smooth signal

#![allow(dead_code)]

pub mod tolerances;

use sensor_replay::core::ManualClock;
use sensor_replay::{ReplayConfig, ReplayEngine};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const MS: i64 = 1_000_000;

/// Engine on a manual clock starting at zero. Returns the clock handle too.
pub fn test_engine(config: ReplayConfig) -> (ReplayEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let engine = ReplayEngine::builder()
        .config(config)
        .clock(clock.clone())
        .build()
        .expect("Failed to create test engine");
    (engine, clock)
}

/// Config for interpolated playback of the accelerometer every `period_ms`.
pub fn interpolated_config(period_ms: f64) -> ReplayConfig {
    let mut config = ReplayConfig::default();
    config.playback.period_ms = Some(period_ms);
    config
}

/// Write `header` and `rows` as a CSV file named `name` inside `dir`.
pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[String]) -> PathBuf {
    let mut text = String::new();
    writeln!(text, "{header}").unwrap();
    for row in rows {
        writeln!(text, "{row}").unwrap();
    }
    let path = dir.join(name);
    std::fs::write(&path, text).expect("Failed to write fixture");
    path
}

/// Accelerometer ramp: `ax` equals the timestamp in milliseconds, `az` is 9.8.
pub fn accel_ramp_rows(times_ms: &[i64]) -> Vec<String> {
    times_ms
        .iter()
        .map(|t| format!("{t},{t},0,9.8"))
        .collect()
}

/// Rows every `step_ms` from 0 to `end_ms` inclusive.
pub fn times(step_ms: i64, end_ms: i64) -> Vec<i64> {
    (0..=end_ms / step_ms).map(|i| i * step_ms).collect()
}

/// Read back an output log as `(timestamp, [ax, ay, az], nano)` rows.
pub fn read_log(path: &Path) -> Vec<(i64, [f64; 3], i64)> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open log");
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["timestamp", "ax", "ay", "az", "nano"]
    );
    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            let field = |i: usize| record[i].to_string();
            (
                field(0).parse().unwrap(),
                [
                    field(1).parse().unwrap(),
                    field(2).parse().unwrap(),
                    field(3).parse().unwrap(),
                ],
                field(4).parse().unwrap(),
            )
        })
        .collect()
}
