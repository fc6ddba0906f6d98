//! View state for the plane canvas.

use eframe::egui::Vec2;

/// Zoom and pan applied on top of the world window.
pub struct ViewState {
    /// Current zoom level (1.0 = whole world window visible)
    pub zoom: f32,

    /// Current pan offset from center, in screen pixels
    pub pan_offset: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }
}

impl ViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
