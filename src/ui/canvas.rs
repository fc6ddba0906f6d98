//! Central canvas UI: the projected grid visualization area.

use crate::engine::ProjectionAnimationEngine;
use crate::geo::PlaneViewport;
use crate::state::AppState;
use eframe::egui::{self, Align2, Color32, FontId, Sense};

/// World radius of one grid marker, in plane meters.
const MARKER_RADIUS_M: f64 = 200_000.0;

pub fn render_canvas(
    ctx: &egui::Context,
    state: &mut AppState,
    engine: &ProjectionAnimationEngine,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, Color32::from_rgb(20, 20, 35));

        if !engine.is_ready() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Initializing projection provider...",
                FontId::proportional(14.0),
                Color32::GRAY,
            );
            return;
        }

        let viewport = PlaneViewport::new(state.view.zoom, state.view.pan_offset, rect);
        let marker_radius = (MARKER_RADIUS_M as f32 * viewport.scale()).max(1.0);

        for point in engine.display() {
            if !point.x.is_finite() || !point.y.is_finite() {
                // Outside the projection's domain
                continue;
            }
            let pos = viewport.plane_to_screen(*point);
            if viewport.on_screen(pos, marker_radius) {
                painter.circle_filled(pos, marker_radius, Color32::from_rgb(220, 60, 60));
            }
        }

        handle_canvas_interaction(&response, state);
    });
}

fn handle_canvas_interaction(response: &egui::Response, state: &mut AppState) {
    // Handle dragging for panning
    if response.dragged() {
        state.view.pan_offset += response.drag_delta();
    }

    // Handle scroll for zooming
    if response.hovered() {
        let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            let zoom_factor = 1.0 + scroll_delta.y * 0.001;
            state.view.zoom = (state.view.zoom * zoom_factor).clamp(0.1, 10.0);
        }
    }
}
