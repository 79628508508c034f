//! Consumer side of playback.

use crate::error::SinkError;
use crate::types::{ChannelGroup, Vec3};

/// One value handed to a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    pub group: ChannelGroup,
    pub value: Vec3,
    /// Real-time offset from the start of the playback pass, in nanoseconds.
    pub offset_ns: i64,
}

/// Accepts emitted samples one at a time.
///
/// `Ok(Some(ack))` carries the consumer's acknowledgement line when one was
/// read back. Only [`SinkError::Unavailable`] stops a run; every other error
/// skips the single emission.
pub trait SensorSink {
    fn emit(&mut self, emission: &Emission) -> Result<Option<String>, SinkError>;

    /// Called once when a run ends, successfully or not.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: SensorSink + ?Sized> SensorSink for &mut S {
    fn emit(&mut self, emission: &Emission) -> Result<Option<String>, SinkError> {
        (**self).emit(emission)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: SensorSink + ?Sized> SensorSink for Box<S> {
    fn emit(&mut self, emission: &Emission) -> Result<Option<String>, SinkError> {
        (**self).emit(emission)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// Sink that keeps every emission in memory.
///
/// Failures can be scripted with [`MemorySink::fail_next`]; they are consumed
/// in order, one per emission, before anything is recorded.
#[derive(Debug, Default)]
pub struct MemorySink {
    emissions: Vec<Emission>,
    scripted: Vec<SinkError>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&mut self, error: SinkError) {
        self.scripted.insert(0, error);
    }

    pub fn emissions(&self) -> &[Emission] {
        &self.emissions
    }

    pub fn of_group(&self, group: ChannelGroup) -> impl Iterator<Item = &Emission> {
        self.emissions.iter().filter(move |e| e.group == group)
    }

    pub fn clear(&mut self) {
        self.emissions.clear();
    }
}

impl SensorSink for MemorySink {
    fn emit(&mut self, emission: &Emission) -> Result<Option<String>, SinkError> {
        if let Some(error) = self.scripted.pop() {
            return Err(error);
        }
        self.emissions.push(*emission);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emission(offset_ns: i64) -> Emission {
        Emission {
            group: ChannelGroup::Gyroscope,
            value: [0.1, 0.2, 0.3],
            offset_ns,
        }
    }

    #[test]
    fn test_memory_sink_scripted_failures_in_order() {
        let mut sink = MemorySink::new();
        sink.fail_next(SinkError::Rejected("KO".into()));
        sink.fail_next(SinkError::Unavailable("gone".into()));

        assert_eq!(sink.emit(&emission(0)), Err(SinkError::Rejected("KO".into())));
        assert!(sink.emit(&emission(1)).unwrap_err().is_fatal());
        assert_eq!(sink.emit(&emission(2)), Ok(None));
        assert_eq!(sink.emissions(), &[emission(2)]);
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let mut sink: Box<dyn SensorSink> = Box::new(MemorySink::new());
        assert!(sink.emit(&emission(0)).is_ok());
        assert!(sink.flush().is_ok());
    }
}
