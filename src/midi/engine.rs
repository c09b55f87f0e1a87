use crate::config::{Channel, ControllerNumber};
use std::error::Error;
use std::fmt;

/// Custom error type for MIDI operations
#[derive(Debug)]
pub enum MidiError {
    /// Error when creating the MIDI client or its virtual port
    ConnectionError(String),
    /// Error when sending a MIDI message
    SendError(String),
    /// The endpoint was already released
    Closed,
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::ConnectionError(msg) => write!(f, "MIDI connection error: {}", msg),
            MidiError::SendError(msg) => write!(f, "MIDI send error: {}", msg),
            MidiError::Closed => write!(f, "MIDI output already closed"),
        }
    }
}

impl Error for MidiError {}

/// Result type for MIDI operations
pub type Result<T> = std::result::Result<T, MidiError>;

/// A Control Change message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChange {
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

impl ControlChange {
    pub fn new(channel: Channel, controller: ControllerNumber, value: u8) -> Self {
        ControlChange {
            channel: channel.index(),
            controller: controller.get(),
            value,
        }
    }

    /// Status byte plus two data bytes, masked to their valid ranges.
    pub fn to_bytes(&self) -> [u8; 3] {
        [
            0xB0 | (self.channel & 0x0F),
            self.controller & 0x7F,
            self.value & 0x7F,
        ]
    }
}

/// The MIDI side as seen by the event loop
pub trait MidiEngine: Send {
    /// Sends one Control Change
    fn send(&mut self, msg: ControlChange) -> Result<()>;

    /// Releases the endpoint. Further sends fail with [`MidiError::Closed`].
    fn close(&mut self);
}
