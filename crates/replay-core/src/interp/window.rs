//! Fixed-capacity sliding window of recent samples.

use super::{InterpolantKind, VectorInterpolant};
use crate::clock::ClockMapping;
use crate::error::{Error, Result};
use crate::types::Vec3;
use std::collections::VecDeque;

/// Samples held by a primed window.
pub const WINDOW_LEN: usize = 4;

/// The last [`WINDOW_LEN`] `(source_time, value)` pairs of one channel group.
///
/// Source times are strictly increasing. Once primed the window always holds
/// exactly [`WINDOW_LEN`] entries: every push past that drops the oldest.
#[derive(Debug, Clone, Default)]
pub struct SlidingWindow {
    entries: VecDeque<(i64, Vec3)>,
}

impl SlidingWindow {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(WINDOW_LEN),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_primed(&self) -> bool {
        self.entries.len() == WINDOW_LEN
    }

    /// Append a sample, dropping the oldest one when the window is primed.
    pub fn push(&mut self, source_time: i64, value: Vec3) -> Result<()> {
        if let Some(&(previous, _)) = self.entries.back() {
            if source_time <= previous {
                return Err(Error::NonMonotonic {
                    previous,
                    current: source_time,
                });
            }
        }
        if self.is_primed() {
            self.entries.pop_front();
        }
        self.entries.push_back((source_time, value));
        Ok(())
    }

    /// Source time of entry `index` (0 = oldest).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn time(&self, index: usize) -> i64 {
        self.entries[index].0
    }

    pub fn times(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Build the interpolant over the window, knots in seconds relative to the
    /// mapping's real origin.
    pub fn build(&self, kind: InterpolantKind, mapping: &ClockMapping) -> Result<VectorInterpolant> {
        if !self.is_primed() {
            return Err(Error::InsufficientSamples {
                needed: WINDOW_LEN,
                available: self.entries.len(),
            });
        }
        let x: Vec<f64> = self
            .entries
            .iter()
            .map(|(t, _)| mapping.source_offset_secs(*t))
            .collect();
        let values: Vec<Vec3> = self.entries.iter().map(|(_, v)| *v).collect();
        VectorInterpolant::build(kind, &x, &values)
    }
}
