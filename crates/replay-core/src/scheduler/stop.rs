use crate::lockfree::AtomicFlag;
use std::sync::Arc;

/// Cooperative stop request for a running playback.
///
/// Clones share the flag. The scheduler polls it at its single blocking point,
/// so a raised signal takes effect within one poll interval.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicFlag>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.flag.set(true);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.get()
    }

    /// Lower the flag so the signal can be reused for another run.
    pub fn reset(&self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let signal = StopSignal::new();
        let handle = signal.clone();
        assert!(!signal.is_raised());
        handle.raise();
        assert!(signal.is_raised());
        signal.reset();
        assert!(!handle.is_raised());
    }
}
