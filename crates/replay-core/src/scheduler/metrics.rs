//! Playback statistics.
//!
//! Counters are shared with whoever holds the `Arc`, so a monitoring thread
//! can snapshot a running playback.

use crate::lockfree::AtomicDouble;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters accumulated across every pass of a scheduler.
#[derive(Debug, Default)]
pub struct PlaybackMetrics {
    /// Values accepted by the sink
    emissions: AtomicU64,
    /// Non-fatal sink failures (emission skipped)
    failures: AtomicU64,
    /// Rows skipped because an enabled group had an absent axis
    skipped: AtomicU64,
    /// Interpolation window slides
    slides: AtomicU64,
    /// Wake-ups that came after their deadline
    late_wakeups: AtomicU64,
    /// Worst wake-up lag in milliseconds
    max_lag_ms: AtomicDouble,
    /// Sum of all wake-up lags in milliseconds
    total_lag_ms: AtomicDouble,
}

impl PlaybackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_emission(&self) {
        self.emissions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_slide(&self) {
        self.slides.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how far past its deadline a wake-up landed. Zero lag is ignored.
    pub fn record_lag(&self, lag_ns: i64) {
        if lag_ns <= 0 {
            return;
        }
        let lag_ms = lag_ns as f64 / 1e6;
        self.late_wakeups.fetch_add(1, Ordering::Relaxed);
        self.max_lag_ms.max(lag_ms);
        self.total_lag_ms.add(lag_ms);
    }

    pub fn snapshot(&self) -> PlaybackMetricsSnapshot {
        PlaybackMetricsSnapshot {
            emissions: self.emissions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            slides: self.slides.load(Ordering::Relaxed),
            late_wakeups: self.late_wakeups.load(Ordering::Relaxed),
            max_lag_ms: self.max_lag_ms.get(),
            total_lag_ms: self.total_lag_ms.get(),
        }
    }

    pub fn reset(&self) {
        self.emissions.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.slides.store(0, Ordering::Relaxed);
        self.late_wakeups.store(0, Ordering::Relaxed);
        self.max_lag_ms.set(0.0);
        self.total_lag_ms.set(0.0);
    }
}

/// Point-in-time copy of [`PlaybackMetrics`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackMetricsSnapshot {
    pub emissions: u64,
    pub failures: u64,
    pub skipped: u64,
    pub slides: u64,
    pub late_wakeups: u64,
    pub max_lag_ms: f64,
    pub total_lag_ms: f64,
}

impl PlaybackMetricsSnapshot {
    /// Average lag of the late wake-ups, 0 when none were late.
    pub fn mean_lag_ms(&self) -> f64 {
        if self.late_wakeups == 0 {
            0.0
        } else {
            self.total_lag_ms / self.late_wakeups as f64
        }
    }

    /// Counters accumulated since `earlier`. `max_lag_ms` stays cumulative.
    pub fn since(&self, earlier: &PlaybackMetricsSnapshot) -> PlaybackMetricsSnapshot {
        PlaybackMetricsSnapshot {
            emissions: self.emissions - earlier.emissions,
            failures: self.failures - earlier.failures,
            skipped: self.skipped - earlier.skipped,
            slides: self.slides - earlier.slides,
            late_wakeups: self.late_wakeups - earlier.late_wakeups,
            max_lag_ms: self.max_lag_ms,
            total_lag_ms: self.total_lag_ms - earlier.total_lag_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = PlaybackMetrics::new();
        metrics.record_emission();
        metrics.record_emission();
        metrics.record_failure();
        metrics.record_skip();
        metrics.record_slide();
        metrics.record_lag(0);
        metrics.record_lag(2_000_000);
        metrics.record_lag(4_000_000);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.emissions, 2);
        assert_eq!(snapshot.failures, 1);
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.slides, 1);
        assert_eq!(snapshot.late_wakeups, 2);
        assert_eq!(snapshot.max_lag_ms, 4.0);
        assert_eq!(snapshot.mean_lag_ms(), 3.0);

        metrics.reset();
        assert_eq!(metrics.snapshot(), PlaybackMetricsSnapshot::default());
    }

    #[test]
    fn test_snapshot_delta() {
        let metrics = PlaybackMetrics::new();
        metrics.record_emission();
        let before = metrics.snapshot();
        metrics.record_emission();
        metrics.record_skip();
        let delta = metrics.snapshot().since(&before);
        assert_eq!(delta.emissions, 1);
        assert_eq!(delta.skipped, 1);
    }
}
