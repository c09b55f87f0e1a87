use std::mem::size_of;

/// Input event type for keys and buttons
pub const EV_KEY: u16 = 0x01;
/// Input event type for relative axes
pub const EV_REL: u16 = 0x02;
/// Relative axis code the knob reports rotation on
pub const REL_WHEEL: u16 = 7;
/// Key code of the knob's push button (BTN_0)
pub const BTN_PRIMARY: u16 = 256;

/// Width of the `struct timeval` that prefixes every record
pub const TIME_FIELD_SIZE: usize = 2 * size_of::<usize>();
/// Width of one complete `struct input_event`
pub const RECORD_SIZE: usize = TIME_FIELD_SIZE + 2 + 2 + 4;

/// What a record means to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Knob rotation on the wheel axis
    Relative,
    /// The knob's button
    Key,
    /// Anything else (sync reports, LED state, other axes or keys)
    Other,
}

/// A decoded input record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: EventKind,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn relative(value: i32) -> Self {
        Self {
            kind: EventKind::Relative,
            code: REL_WHEEL,
            value,
        }
    }

    pub fn key(value: i32) -> Self {
        Self {
            kind: EventKind::Key,
            code: BTN_PRIMARY,
            value,
        }
    }

    /// Decodes one native-endian `struct input_event`.
    ///
    /// The timestamp is skipped; the controller has no use for it.
    pub fn decode(record: &[u8; RECORD_SIZE]) -> Self {
        let body = &record[TIME_FIELD_SIZE..];
        let ev_type = u16::from_ne_bytes([body[0], body[1]]);
        let code = u16::from_ne_bytes([body[2], body[3]]);
        let value = i32::from_ne_bytes([body[4], body[5], body[6], body[7]]);

        Self {
            kind: classify(ev_type, code),
            code,
            value,
        }
    }
}

fn classify(ev_type: u16, code: u16) -> EventKind {
    match (ev_type, code) {
        (EV_REL, REL_WHEEL) => EventKind::Relative,
        (EV_KEY, BTN_PRIMARY) => EventKind::Key,
        _ => EventKind::Other,
    }
}
