//! Top bar UI: app title, active projection, and status.

use crate::engine::ProjectionAnimationEngine;
use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(
    ctx: &egui::Context,
    state: &mut AppState,
    engine: &ProjectionAnimationEngine,
) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("Projection Workbench")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                if engine.is_ready() {
                    let label = engine.target_definition().label();
                    let text = if engine.is_animating() {
                        format!("Animating to {}", label)
                    } else {
                        format!("Showing {}", label)
                    };
                    ui.label(
                        RichText::new(text)
                            .size(13.0)
                            .color(Color32::from_rgb(200, 200, 220)),
                    );
                    ui.separator();
                }

                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );
            });
        });
}
