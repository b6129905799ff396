//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`controls`]: Form fields (size, speed, algorithm, chart style, literal
//!   array) and the action buttons with their enabled state
//! - [`chart`]: The current snapshot drawn as scatter points, columns or stems
//! - [`stats`]: Comparison counter and Big-O commentary
//! - [`status`]: Status bar with run state, messages and keybindings
//!
//! Each pane module exports a `render_*` function taking the frame, its area
//! and borrowed render data; none of them keep state.

pub mod chart;
pub mod controls;
pub mod stats;
pub mod status;

// Re-export render functions for convenience
pub use chart::render_chart_pane;
pub use controls::{render_controls_pane, ControlsRenderData};
pub use stats::{render_stats_pane, StatsRenderData};
pub use status::render_status_bar;
