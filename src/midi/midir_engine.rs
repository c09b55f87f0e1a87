use crate::midi::{ControlChange, MidiEngine, MidiError, Result};
use log::{debug, info};
use midir::os::unix::VirtualOutput;
use midir::{MidiOutput, MidiOutputConnection};

/// Publishes a virtual output port that synths can subscribe to
pub struct MidirEngine {
    output: Option<MidiOutputConnection>,
    port_name: String,
}

impl MidirEngine {
    /// Registers the MIDI client and creates its virtual port.
    pub fn new(client_name: &str, port_name: &str) -> Result<Self> {
        let midi_out = MidiOutput::new(client_name).map_err(|e| {
            MidiError::ConnectionError(format!("opening client '{}': {}", client_name, e))
        })?;

        let output = midi_out.create_virtual(port_name).map_err(|e| {
            MidiError::ConnectionError(format!("creating port '{}': {}", port_name, e))
        })?;

        info!(
            "Created virtual MIDI port '{}:{}'",
            client_name, port_name
        );

        Ok(MidirEngine {
            output: Some(output),
            port_name: port_name.to_string(),
        })
    }
}

impl MidiEngine for MidirEngine {
    fn send(&mut self, msg: ControlChange) -> Result<()> {
        let output = self.output.as_mut().ok_or(MidiError::Closed)?;
        debug!(
            "Sending MIDI CC: ch={}, cc={}, value={}",
            msg.channel, msg.controller, msg.value
        );
        output
            .send(&msg.to_bytes())
            .map_err(|e| MidiError::SendError(e.to_string()))
    }

    fn close(&mut self) {
        if let Some(output) = self.output.take() {
            output.close();
            info!("Closed virtual MIDI port '{}'", self.port_name);
        }
    }
}

impl Drop for MidirEngine {
    fn drop(&mut self) {
        self.close();
    }
}
