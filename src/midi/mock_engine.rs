use crate::midi::{ControlChange, MidiEngine, MidiError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Records everything sent to it.
///
/// Clones share the same record, so a test can keep one handle while the
/// event loop owns another.
#[derive(Clone, Default)]
pub struct MockMidiEngine {
    sent: Arc<Mutex<Vec<ControlChange>>>,
    closed: Arc<AtomicBool>,
    fail_sends: bool,
}

impl MockMidiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose every send fails, though attempts are still recorded.
    pub fn failing() -> Self {
        MockMidiEngine {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ControlChange> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn sent_values(&self) -> Vec<u8> {
        self.sent().iter().map(|m| m.value).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl MidiEngine for MockMidiEngine {
    fn send(&mut self, msg: ControlChange) -> Result<()> {
        if self.is_closed() {
            return Err(MidiError::Closed);
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(msg);
        }
        if self.fail_sends {
            return Err(MidiError::SendError("mock send failure".to_string()));
        }
        Ok(())
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
