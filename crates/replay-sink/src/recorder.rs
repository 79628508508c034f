//! Sink decorator that logs what it forwards.

use crate::log::{unix_millis, LogWriter};
use replay_core::{ChannelGroup, Emission, SensorSink, SinkError};
use std::io::Write;
use tracing::warn;

/// Forwards every emission to `inner` and logs the accepted ones of `group`.
///
/// Log rows carry wall-clock milliseconds and the emission's offset from the
/// start of its pass. A failing log never fails the emission.
pub struct RecordingSink<S, W: Write> {
    inner: S,
    log: LogWriter<W>,
    group: ChannelGroup,
}

impl<S: SensorSink, W: Write> RecordingSink<S, W> {
    pub fn new(inner: S, log: LogWriter<W>, group: ChannelGroup) -> Self {
        Self { inner, log, group }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn log(&self) -> &LogWriter<W> {
        &self.log
    }

    pub fn into_parts(self) -> (S, LogWriter<W>) {
        (self.inner, self.log)
    }
}

impl<S: SensorSink, W: Write> SensorSink for RecordingSink<S, W> {
    fn emit(&mut self, emission: &Emission) -> Result<Option<String>, SinkError> {
        let ack = self.inner.emit(emission)?;
        if emission.group == self.group {
            if let Err(e) = self
                .log
                .write_row(unix_millis(), emission.value, emission.offset_ns)
            {
                warn!(error = %e, "output log write failed");
            }
        }
        Ok(ack)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let inner = self.inner.flush();
        self.log
            .flush()
            .map_err(|e| SinkError::Failed(format!("output log: {e}")))?;
        inner
    }
}
