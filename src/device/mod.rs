//! Knob input device handling
//!
//! The knob shows up as a Linux input device node which yields a stream of
//! fixed-size `struct input_event` records. This module provides:
//! - [`RawEvent`] decoding and classification of those records
//! - [`EventReader`] for pulling one record at a time from any byte stream
//! - [`spawn_reader`] to run the blocking reads on their own thread
//!
mod event;
mod reader;

pub use event::{
    EventKind, RawEvent, BTN_PRIMARY, EV_KEY, EV_REL, RECORD_SIZE, REL_WHEEL, TIME_FIELD_SIZE,
};
pub use reader::{spawn_reader, DeviceMessage, EventReader};

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while talking to the input device
#[derive(Debug)]
pub enum DeviceError {
    /// The device node could not be opened
    Open { path: PathBuf, source: io::Error },
    /// The device stream failed mid-read and cannot be recovered
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Open { path, source } => {
                write!(f, "Could not open device from: {} ({})", path.display(), source)
            }
            DeviceError::Read { path, source } => {
                write!(f, "Device {} became unreadable: {}", path.display(), source)
            }
        }
    }
}

impl Error for DeviceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeviceError::Open { source, .. } | DeviceError::Read { source, .. } => Some(source),
        }
    }
}
