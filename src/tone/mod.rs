//! Audible feedback for highlighted elements
//!
//! Each highlighted index sounds one MIDI note whose pitch is the element's
//! value mapped linearly onto a note range. The [`ToneSink`] trait hides the
//! output device; [`Silent`] is used when tones are disabled or the crate is
//! built without the `midi` feature.

#[cfg(feature = "midi")]
mod midi;

#[cfg(feature = "midi")]
pub use midi::MidiTones;

use crate::config::ToneConfig;
use crate::error::Result;
#[cfg(not(feature = "midi"))]
use crate::error::Error;
use tracing::{info, warn};

/// Output for highlight tones
pub trait ToneSink {
    /// Release sounding notes and start `notes`, one entry per highlighted
    /// index. Equal pitches may repeat.
    fn play(&mut self, notes: &[u8]) -> Result<()>;

    /// Release every sounding note.
    fn silence(&mut self) -> Result<()>;
}

/// Sink that discards every note
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ToneSink for Silent {
    fn play(&mut self, _notes: &[u8]) -> Result<()> {
        Ok(())
    }

    fn silence(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Linear value → MIDI note mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneMap {
    pub low_note: u8,
    pub high_note: u8,
}

impl Default for ToneMap {
    fn default() -> Self {
        ToneMap {
            low_note: 36,
            high_note: 96,
        }
    }
}

impl ToneMap {
    pub fn from_config(config: &ToneConfig) -> Self {
        ToneMap {
            low_note: config.low_note,
            high_note: config.high_note,
        }
    }

    /// Note for `value` given the sequence's `(min, max)`.
    pub fn note_for(&self, value: i64, (min, max): (i64, i64)) -> u8 {
        if max <= min {
            return self.low_note;
        }
        let span = f64::from(self.high_note.saturating_sub(self.low_note));
        let ratio = (value.clamp(min, max) as f64 - min as f64) / (max as f64 - min as f64);
        self.low_note + (ratio * span).round() as u8
    }

    /// One note per highlighted index of `values`; indices past the end are
    /// skipped.
    pub fn notes(&self, values: &[i64], highlights: &[usize], bounds: (i64, i64)) -> Vec<u8> {
        highlights
            .iter()
            .filter_map(|&index| values.get(index))
            .map(|&value| self.note_for(value, bounds))
            .collect()
    }
}

/// Open the configured tone output, falling back to [`Silent`].
pub fn open(config: &ToneConfig) -> Box<dyn ToneSink> {
    if !config.enabled {
        return Box::new(Silent);
    }

    match open_device(config) {
        Ok(sink) => sink,
        Err(e) => {
            warn!("tones disabled: {}", e);
            Box::new(Silent)
        }
    }
}

#[cfg(feature = "midi")]
fn open_device(config: &ToneConfig) -> Result<Box<dyn ToneSink>> {
    let sink = MidiTones::connect(&config.port, config.channel, config.velocity)?;
    info!(port = %sink.port_name(), "tone output connected");
    Ok(Box::new(sink))
}

#[cfg(not(feature = "midi"))]
fn open_device(_config: &ToneConfig) -> Result<Box<dyn ToneSink>> {
    info!("tone output requested but MIDI support is not compiled in");
    Err(Error::Tone("built without the `midi` feature".to_string()))
}

/// Names of the available MIDI output ports.
#[cfg(feature = "midi")]
pub fn list_ports() -> Result<Vec<String>> {
    midi::port_names()
}

/// Names of the available MIDI output ports.
#[cfg(not(feature = "midi"))]
pub fn list_ports() -> Result<Vec<String>> {
    Err(Error::Tone("built without the `midi` feature".to_string()))
}
