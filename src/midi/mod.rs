//! MIDI output for powermodrs
//!
//! The translator only ever needs two things from MIDI: send a Control
//! Change and release the endpoint when done. This module provides:
//! - [`MidiEngine`] trait describing that boundary
//! - [`ControlChange`] and its wire encoding
//! - [`MidirEngine`] which publishes a virtual output port via midir
//! - [`MockMidiEngine`] which records messages for tests
//!
mod engine;
pub mod midir_engine;
pub mod mock_engine;

pub use engine::{ControlChange, MidiEngine, MidiError, Result};

pub use midir_engine::MidirEngine;
pub use mock_engine::MockMidiEngine;

pub type DefaultMidiEngine = MidirEngine;
