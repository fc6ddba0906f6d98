//! Application state management.
//!
//! State the UI panels read and write. Engine-owned state (the displayed
//! grid, the active transition) lives in the engine, not here.

mod view;

pub use view::ViewState;

use crate::proj::ProjectionDefinition;

/// Root application state shared with the UI panels.
#[derive(Default)]
pub struct AppState {
    /// View controls for the canvas
    pub view: ViewState,

    /// Application status message displayed in the top bar
    pub status_message: String,

    /// Projection switch requested by the UI, consumed by the app loop
    pub requested_projection: Option<ProjectionDefinition>,

    /// Whether a view reset was requested
    pub reset_view_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status_message: "Initializing projection provider...".to_string(),
            ..Default::default()
        }
    }
}
