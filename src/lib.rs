//! # Introduction
//!
//! sortty animates classic comparison sorts (bubble, selection, insertion,
//! merge and quick sort) over a random or user-supplied array in a terminal UI
//! built with [ratatui](https://docs.rs/ratatui). Each step is drawn as a
//! scatter, column or stem chart with the touched elements highlighted, and can
//! optionally sound one MIDI note per highlighted element.
//!
//! ## Pipeline
//!
//! ```text
//! Setup → Controller → Runner (worker thread) → StepEvents → ViewState → TUI
//! ```
//!
//! 1. [`control`]: validates the form ([`control::Setup`]) and drives the run
//!    lifecycle (Idle → Configured → Running → Stopped/Completed).
//! 2. [`sorting`]: the algorithms, written against an [`sorting::Observer`]
//!    that counts comparisons, receives steps and can break the run.
//! 3. [`runner`]: runs one algorithm on a worker thread and hands each step to
//!    the UI through a bounded channel; stop is cooperative via
//!    [`sorting::CancelToken`].
//! 4. [`view`]: the latest snapshot, highlights and chart style.
//! 5. [`tone`]: value-to-pitch mapping and MIDI output (`midi` feature).
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod config;
pub mod control;
pub mod error;
pub mod runner;
pub mod sorting;
pub mod tone;
pub mod ui;
pub mod view;

pub use error::{Error, Result};
