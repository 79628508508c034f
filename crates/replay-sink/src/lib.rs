//! Sensor sinks for replay output.
//!
//! - [`EmulatorConsole`]: line-oriented TCP console of a virtual device
//! - [`LogWriter`]: `timestamp,ax,ay,az,nano` CSV log
//! - [`RecordingSink`]: forwards to another sink and logs what was accepted

pub mod command;
pub mod config;
mod console;
pub mod error;
pub mod log;
mod recorder;

pub use config::ConsoleConfig;
pub use console::EmulatorConsole;
pub use error::{Error, Result};
pub use log::{unix_millis, LogWriter, LOG_HEADER};
pub use recorder::RecordingSink;
