//! Plane viewport: converting projected plane coordinates to screen positions.
//!
//! The canvas shows a fixed window of the projected plane, wide enough for
//! the full extent of a world projection, with zoom and pan applied on top.

use eframe::egui::{Pos2, Rect, Vec2};

use super::PlanarPoint;

/// Horizontal half-extent of the visible plane at zoom 1.0, in meters.
pub const WORLD_HALF_WIDTH: f64 = 20_000_000.0;

/// Vertical half-extent of the visible plane at zoom 1.0, in meters.
pub const WORLD_HALF_HEIGHT: f64 = 10_000_000.0;

/// Viewport mapping projected plane coordinates onto the canvas.
#[derive(Debug, Clone)]
pub struct PlaneViewport {
    /// Current zoom level
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: Vec2,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl PlaneViewport {
    pub fn new(zoom: f32, pan_offset: Vec2, screen_rect: Rect) -> Self {
        Self {
            zoom,
            pan_offset,
            screen_rect,
        }
    }

    /// Screen pixels per plane meter at the current zoom.
    ///
    /// The scale is chosen so the whole world window fits the smaller
    /// canvas dimension at zoom 1.0.
    pub fn scale(&self) -> f32 {
        let sx = self.screen_rect.width() as f64 / (2.0 * WORLD_HALF_WIDTH);
        let sy = self.screen_rect.height() as f64 / (2.0 * WORLD_HALF_HEIGHT);
        sx.min(sy) as f32 * self.zoom
    }

    /// Converts a plane coordinate to a screen position.
    ///
    /// Plane y grows northward while screen y grows downward, so y flips.
    pub fn plane_to_screen(&self, point: PlanarPoint) -> Pos2 {
        let scale = self.scale();
        let center = self.screen_rect.center() + self.pan_offset;
        Pos2::new(
            center.x + point.x as f32 * scale,
            center.y - point.y as f32 * scale,
        )
    }

    /// Whether a screen position lands on the canvas (with margin in pixels).
    pub fn on_screen(&self, pos: Pos2, margin: f32) -> bool {
        self.screen_rect.expand(margin).contains(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_viewport(zoom: f32) -> PlaneViewport {
        PlaneViewport::new(
            zoom,
            Vec2::ZERO,
            Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 400.0)),
        )
    }

    #[test]
    fn test_plane_origin_maps_to_canvas_center() {
        let viewport = test_viewport(1.0);
        let pos = viewport.plane_to_screen(PlanarPoint { x: 0.0, y: 0.0 });
        assert_eq!(pos, Pos2::new(400.0, 200.0));
    }

    #[test]
    fn test_northward_is_up() {
        let viewport = test_viewport(1.0);
        let north = viewport.plane_to_screen(PlanarPoint {
            x: 0.0,
            y: 5_000_000.0,
        });
        // Screen y decreases toward the top of the canvas
        assert!(north.y < 200.0);
        assert_eq!(north.x, 400.0);
    }

    #[test]
    fn test_zoom_scales_linearly() {
        let near = test_viewport(2.0);
        let far = test_viewport(1.0);
        assert_eq!(near.scale(), far.scale() * 2.0);
    }

    #[test]
    fn test_world_edge_stays_on_screen_at_default_zoom() {
        let viewport = test_viewport(1.0);
        let edge = viewport.plane_to_screen(PlanarPoint {
            x: WORLD_HALF_WIDTH,
            y: WORLD_HALF_HEIGHT,
        });
        assert!(viewport.on_screen(edge, 1.0));
    }
}
