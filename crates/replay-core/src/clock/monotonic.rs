//! Clock implementations.
//!
//! Real time is measured in integer nanoseconds from the clock's own origin.
//! [`SystemClock`] follows the host's monotonic clock; [`ManualClock`] only moves
//! when slept on or advanced, which makes pacing fully deterministic in tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time base used to pace emissions.
pub trait Clock {
    /// Nanoseconds elapsed since the clock's origin.
    fn now_ns(&self) -> i64;

    /// Block until `deadline_ns`. Returns immediately when the deadline has passed.
    fn sleep_until_ns(&self, deadline_ns: i64);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ns(&self) -> i64 {
        (**self).now_ns()
    }

    fn sleep_until_ns(&self, deadline_ns: i64) {
        (**self).sleep_until_ns(deadline_ns)
    }
}

/// Host monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ns(&self) -> i64 {
        self.origin.elapsed().as_nanos() as i64
    }

    fn sleep_until_ns(&self, deadline_ns: i64) {
        let remaining = deadline_ns - self.now_ns();
        if remaining > 0 {
            std::thread::sleep(Duration::from_nanos(remaining as u64));
        }
    }
}

/// Simulated clock. Sleeping jumps straight to the deadline.
///
/// Clones share the same time, so a test can keep a handle while the scheduler
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ns: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now_ns)),
        }
    }

    /// Move time forward by `delta_ns`.
    pub fn advance(&self, delta_ns: i64) {
        self.now.fetch_add(delta_ns.max(0), Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> i64 {
        self.now.load(Ordering::Acquire)
    }

    fn sleep_until_ns(&self, deadline_ns: i64) {
        self.now.fetch_max(deadline_ns, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_sleep_jumps() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ns(), 0);

        clock.sleep_until_ns(5_000_000);
        assert_eq!(clock.now_ns(), 5_000_000);

        // Deadlines in the past never rewind time
        clock.sleep_until_ns(1_000);
        assert_eq!(clock.now_ns(), 5_000_000);

        let shared = clock.clone();
        shared.advance(1_000);
        assert_eq!(clock.now_ns(), 5_001_000);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ns();
        clock.sleep_until_ns(a + 1_000_000);
        let b = clock.now_ns();
        assert!(b >= a + 1_000_000, "slept {} ns", b - a);
    }
}
