// event_loop.rs

use crate::config::{Channel, Config, ControllerNumber};
use crate::controller::ControllerState;
use crate::device::{DeviceError, DeviceMessage, RawEvent};
use crate::midi::{ControlChange, MidiEngine};
use crossbeam::channel::{select, Receiver, TryRecvError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt;

/// Why the loop stopped without being asked to
#[derive(Debug)]
pub enum LoopError {
    /// The reader reported the device as unreadable
    Device(DeviceError),
    /// The reader thread went away without reporting anything
    ReaderGone,
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::Device(e) => write!(f, "{}", e),
            LoopError::ReaderGone => write!(f, "Device reader stopped unexpectedly"),
        }
    }
}

impl Error for LoopError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoopError::Device(e) => Some(e),
            LoopError::ReaderGone => None,
        }
    }
}

enum Wakeup {
    Device(DeviceMessage),
    ReaderGone,
    Shutdown,
}

/// Drives knob events through the controller and out to MIDI.
///
/// Pending device events are always drained before a shutdown request is
/// honoured. The engine is closed on every way out of [`run`](Self::run).
pub struct EventLoop<E: MidiEngine> {
    channel: Channel,
    controller: ControllerNumber,
    state: ControllerState,
    engine: E,
    events: Receiver<DeviceMessage>,
    shutdown: Receiver<()>,
}

impl<E: MidiEngine> EventLoop<E> {
    pub fn new(
        config: &Config,
        engine: E,
        events: Receiver<DeviceMessage>,
        shutdown: Receiver<()>,
    ) -> Self {
        EventLoop {
            channel: config.channel,
            controller: config.controller,
            state: ControllerState::new(config.acceleration),
            engine,
            events,
            shutdown,
        }
    }

    /// Starts the knob at `value` instead of 0, treating it as already sent.
    pub fn with_initial_value(mut self, value: u8) -> Self {
        self.state = ControllerState::with_value(self.state.acceleration(), value);
        self
    }

    pub fn value(&self) -> u8 {
        self.state.value()
    }

    /// Runs until shutdown is requested or the device fails.
    pub fn run(mut self) -> Result<(), LoopError> {
        info!(
            "Event loop running: channel {}, CC {}",
            self.channel.number(),
            self.controller.get()
        );
        let result = self.run_until_stopped();
        self.engine.close();
        match &result {
            Ok(()) => info!("Event loop stopped"),
            Err(e) => error!("Event loop aborted: {}", e),
        }
        result
    }

    fn run_until_stopped(&mut self) -> Result<(), LoopError> {
        loop {
            let wakeup = match self.events.try_recv() {
                Ok(message) => Wakeup::Device(message),
                Err(TryRecvError::Disconnected) => Wakeup::ReaderGone,
                Err(TryRecvError::Empty) => select! {
                    recv(self.shutdown) -> _ => Wakeup::Shutdown,
                    recv(self.events) -> message => match message {
                        Ok(message) => Wakeup::Device(message),
                        Err(_) => Wakeup::ReaderGone,
                    },
                },
            };

            match wakeup {
                Wakeup::Device(Ok(event)) => {
                    self.process_event(&event);
                }
                Wakeup::Device(Err(e)) => return Err(LoopError::Device(e)),
                Wakeup::ReaderGone => return Err(LoopError::ReaderGone),
                Wakeup::Shutdown => {
                    info!("Shutdown requested");
                    return Ok(());
                }
            }
        }
    }

    /// Handles one event, sending a CC if the value moved off the last one
    /// sent. Send failures are logged and the value is not retried.
    pub fn process_event(&mut self, event: &RawEvent) -> Option<ControlChange> {
        let value = self.state.process(event)?;
        let msg = ControlChange::new(self.channel, self.controller, value);
        debug!("Value changed to {} after {:?}", value, event);

        if let Err(e) = self.engine.send(msg) {
            warn!("Failed to send CC {}: {}", value, e);
        }
        Some(msg)
    }
}
