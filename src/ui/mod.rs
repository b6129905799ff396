//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, control focus and the
//!   animation tick
//! - **[`panes`]**: stateless render functions for each visible pane (controls,
//!   chart, stats, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Controller`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Controller`]: crate::control::Controller
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
