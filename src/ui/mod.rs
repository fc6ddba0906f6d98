//! UI modules for the projection workbench.
//!
//! The UI is split into distinct panels:
//! - Top bar: title, active projection, and status
//! - Left panel: projection switching and view controls
//! - Central canvas: the projected grid

mod canvas;
mod left_panel;
mod top_bar;

pub use canvas::render_canvas;
pub use left_panel::render_left_panel;
pub use top_bar::render_top_bar;
