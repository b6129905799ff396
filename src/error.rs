//! Error types for sortty.
//!
//! Validation errors (bad size, missing algorithm, empty array, malformed
//! literal) are recoverable: the UI shows them in the status bar and keeps the
//! current state. Configuration errors are only raised at start-up.

use crate::control::{Action, RunState};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving a sorting run.
#[derive(Debug, Error)]
pub enum Error {
    /// Size text is not a positive integer.
    #[error("invalid size input '{input}': {reason}")]
    InvalidSize {
        /// The text the user entered.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Create was requested without choosing an algorithm.
    #[error("no algorithm chosen")]
    NoAlgorithm,

    /// The derived array has no elements.
    #[error("no data to sort")]
    EmptyArray,

    /// A literal array token is not an integer.
    #[error("invalid array value '{token}' at position {position}")]
    InvalidArrayValue {
        /// The offending token, trimmed.
        token: String,
        /// 1-based position in the comma-separated list.
        position: usize,
    },

    /// A literal array longer than the size limit.
    #[error("array has {len} values: at most {max} are allowed")]
    ArrayTooLong {
        /// Number of values parsed.
        len: usize,
        /// The size limit.
        max: usize,
    },

    /// Speed outside of 1..=100.
    #[error("invalid speed {0}: expected 1..=100")]
    InvalidSpeed(u8),

    /// The control state machine refused an action.
    #[error("cannot {action} while {state}")]
    ActionUnavailable {
        /// The requested action.
        action: Action,
        /// The state at the time of the request.
        state: RunState,
    },

    /// Configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::config::Config`].
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// Dotted key, e.g. `tone.high_note`.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Tone output failed (device missing, send failed, feature disabled).
    #[error("tone output error: {0}")]
    Tone(String),

    /// The sorting worker thread panicked.
    #[error("sorting worker panicked")]
    WorkerPanicked,

    /// Terminal or thread-spawn I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
