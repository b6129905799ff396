//! MIDI tone output over midir

use super::ToneSink;
use crate::error::{Error, Result};
use midir::{MidiOutput, MidiOutputConnection};

const CLIENT_NAME: &str = "sortty";

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

/// Sounds highlight notes on a MIDI output port
pub struct MidiTones {
    connection: MidiOutputConnection,
    port_name: String,
    channel: u8,
    velocity: u8,
    sounding: Vec<u8>,
}

impl MidiTones {
    /// Connect to the first output port whose name contains `port`
    /// (the first port at all when `port` is empty).
    pub fn connect(port: &str, channel: u8, velocity: u8) -> Result<Self> {
        let midi_out = MidiOutput::new(CLIENT_NAME).map_err(|e| Error::Tone(e.to_string()))?;

        let mut selected = None;
        for candidate in midi_out.ports() {
            let name = midi_out
                .port_name(&candidate)
                .map_err(|e| Error::Tone(e.to_string()))?;
            if name.contains(port) {
                selected = Some((candidate, name));
                break;
            }
        }

        let (out_port, port_name) =
            selected.ok_or_else(|| Error::Tone(format!("MIDI port '{port}' not found")))?;

        let connection = midi_out
            .connect(&out_port, "sortty-tones")
            .map_err(|e| Error::Tone(e.to_string()))?;

        Ok(MidiTones {
            connection,
            port_name,
            channel: channel & 0x0F,
            velocity: velocity & 0x7F,
            sounding: Vec::new(),
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    fn send(&mut self, message: [u8; 3]) -> Result<()> {
        self.connection
            .send(&message)
            .map_err(|e| Error::Tone(e.to_string()))
    }
}

impl ToneSink for MidiTones {
    fn play(&mut self, notes: &[u8]) -> Result<()> {
        self.silence()?;
        for &note in notes {
            self.send([NOTE_ON | self.channel, note & 0x7F, self.velocity])?;
            self.sounding.push(note);
        }
        Ok(())
    }

    fn silence(&mut self) -> Result<()> {
        while let Some(note) = self.sounding.pop() {
            self.send([NOTE_OFF | self.channel, note & 0x7F, 0])?;
        }
        Ok(())
    }
}

impl Drop for MidiTones {
    fn drop(&mut self) {
        let _ = self.silence();
    }
}

pub fn port_names() -> Result<Vec<String>> {
    let midi_out = MidiOutput::new(CLIENT_NAME).map_err(|e| Error::Tone(e.to_string()))?;
    midi_out
        .ports()
        .iter()
        .map(|port| {
            midi_out
                .port_name(port)
                .map_err(|e| Error::Tone(e.to_string()))
        })
        .collect()
}
