// controller.rs

use crate::config::Acceleration;
use crate::device::{EventKind, RawEvent};
use log::trace;

/// Highest value a CC can carry
pub const CC_MAX: u8 = 127;

/// Tracks the CC level driven by the knob.
///
/// `value` is where the knob currently sits, `last_sent` is what the synth
/// was last told. The two only diverge between [`apply`](Self::apply) and
/// [`take_pending`](Self::take_pending).
#[derive(Debug, Clone)]
pub struct ControllerState {
    value: u8,
    last_sent: u8,
    acceleration: Acceleration,
}

impl ControllerState {
    pub fn new(acceleration: Acceleration) -> Self {
        Self::with_value(acceleration, 0)
    }

    /// Starts from `value` as if it had already been sent.
    pub fn with_value(acceleration: Acceleration, value: u8) -> Self {
        let value = value.min(CC_MAX);
        ControllerState {
            value,
            last_sent: value,
            acceleration,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn last_sent(&self) -> u8 {
        self.last_sent
    }

    pub fn acceleration(&self) -> Acceleration {
        self.acceleration
    }

    /// Applies one event and reports whether it moved the value.
    pub fn apply(&mut self, event: &RawEvent) -> bool {
        let before = self.value;
        let step = self.acceleration.get();

        match (event.kind, event.value) {
            (EventKind::Relative, -1) => self.value = self.value.saturating_sub(step),
            (EventKind::Relative, 1) => self.value = self.value.saturating_add(step).min(CC_MAX),
            (EventKind::Relative, other) => {
                trace!("Ignoring wheel step of magnitude {}", other);
            }
            (EventKind::Key, 1) => self.value = 0,
            _ => {}
        }

        self.value != before
    }

    /// Returns the value to send if it differs from the last one sent.
    ///
    /// `last_sent` advances here, before the caller attempts the send.
    pub fn take_pending(&mut self) -> Option<u8> {
        if self.value == self.last_sent {
            return None;
        }
        self.last_sent = self.value;
        Some(self.value)
    }

    /// One loop iteration: apply the event, then check against `last_sent`.
    pub fn process(&mut self, event: &RawEvent) -> Option<u8> {
        self.apply(event);
        self.take_pending()
    }
}
