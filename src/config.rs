//! Configuration file support.
//!
//! An optional TOML file supplies the initial form values, slider limits and
//! tone settings. Precedence is CLI > file > defaults; the CLI layer is applied
//! in `main`.

use crate::error::{Error, Result};
use crate::sorting::Algorithm;
use crate::view::ChartStyle;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Initial values of the controls pane.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    /// Size slider position.
    pub size: usize,
    /// Speed slider position (1..=100).
    pub speed: u8,
    /// Preselected algorithm; none means the user must pick one.
    pub algorithm: Option<Algorithm>,
    pub chart: ChartStyle,
    /// Literal comma-separated array.
    pub array: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            size: 100,
            speed: 50,
            algorithm: None,
            chart: ChartStyle::default(),
            array: String::new(),
        }
    }
}

/// Size slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    pub size_min: usize,
    pub size_max: usize,
    pub size_step: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            size_min: 10,
            size_max: 500,
            size_step: 10,
        }
    }
}

/// Tone output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToneConfig {
    pub enabled: bool,
    /// Substring of the MIDI output port name; empty picks the first port.
    pub port: String,
    pub channel: u8,
    pub velocity: u8,
    pub low_note: u8,
    pub high_note: u8,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: String::new(),
            channel: 0,
            velocity: 80,
            low_note: 36,
            high_note: 96,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Event poll timeout in milliseconds.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 16 }
    }
}

impl UiConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: Defaults,
    pub limits: Limits,
    pub tone: ToneConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse and validate TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &'static str, message: String| Err(Error::ConfigInvalid { key, message });

        let limits = &self.limits;
        if limits.size_min == 0 {
            return invalid("limits.size_min", "must be at least 1".to_string());
        }
        if limits.size_min > limits.size_max {
            return invalid(
                "limits.size_max",
                format!("{} is below size_min {}", limits.size_max, limits.size_min),
            );
        }
        if limits.size_step == 0 {
            return invalid("limits.size_step", "must be at least 1".to_string());
        }

        let defaults = &self.defaults;
        if !(limits.size_min..=limits.size_max).contains(&defaults.size) {
            return invalid(
                "defaults.size",
                format!(
                    "{} is outside {}..={}",
                    defaults.size, limits.size_min, limits.size_max
                ),
            );
        }
        if !(1..=100).contains(&defaults.speed) {
            return invalid(
                "defaults.speed",
                format!("{} is outside 1..=100", defaults.speed),
            );
        }

        let tone = &self.tone;
        if tone.channel > 15 {
            return invalid("tone.channel", format!("{} is above 15", tone.channel));
        }
        if tone.velocity > 127 {
            return invalid("tone.velocity", format!("{} is above 127", tone.velocity));
        }
        if tone.high_note > 127 {
            return invalid("tone.high_note", format!("{} is above 127", tone.high_note));
        }
        if tone.low_note >= tone.high_note {
            return invalid(
                "tone.low_note",
                format!(
                    "{} must be below high_note {}",
                    tone.low_note, tone.high_note
                ),
            );
        }

        if self.ui.tick_ms == 0 {
            return invalid("ui.tick_ms", "must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.defaults.size, 100);
        assert_eq!(config.limits.size_max, 500);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [defaults]
            algorithm = "merge"
            chart = "stems"
            speed = 90

            [tone]
            enabled = true
            high_note = 84
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.algorithm, Some(Algorithm::Merge));
        assert_eq!(config.defaults.chart, ChartStyle::Stems);
        assert_eq!(config.defaults.speed, 90);
        assert_eq!(config.defaults.size, 100);
        assert!(config.tone.enabled);
        assert_eq!(config.tone.high_note, 84);
        assert_eq!(config.tone.low_note, 36);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::parse("[defaults]\ncolour = \"red\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_out_of_range_values() {
        let err = Config::parse("[defaults]\nspeed = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigInvalid {
                key: "defaults.speed",
                ..
            }
        ));

        let err = Config::parse("[tone]\nlow_note = 90\nhigh_note = 60\n").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { key: "tone.low_note", .. }));

        let err = Config::parse("[limits]\nsize_min = 200\nsize_max = 100\n").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { key: "limits.size_max", .. }));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(Config::parse("[defaults]\nalgorithm = \"bogo\"\n").is_err());
    }
}
