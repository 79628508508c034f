//! Monotonic clocks and the source-to-real time mapping.

mod mapping;
mod monotonic;

pub use mapping::ClockMapping;
pub use monotonic::{Clock, ManualClock, SystemClock};
