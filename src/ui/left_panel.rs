//! Left panel UI: projection selection and view controls.

use crate::engine::{ProjectionAnimationEngine, GRID_SPACING_DEGREES};
use crate::proj::ProjectionDefinition;
use crate::state::AppState;
use eframe::egui::{self, RichText};

pub fn render_left_panel(
    ctx: &egui::Context,
    state: &mut AppState,
    engine: &ProjectionAnimationEngine,
) {
    egui::SidePanel::left("left_panel")
        .exact_width(200.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Projection");
            ui.separator();

            if !engine.is_ready() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Waiting for provider...");
                });
                ui.add_space(5.0);
            }

            for &definition in ProjectionDefinition::active() {
                // A projection without a cached grid cannot be shown
                let enabled = engine.has_projection(definition);
                if ui
                    .add_enabled(enabled, egui::Button::new(definition.label()))
                    .clicked()
                {
                    state.requested_projection = Some(definition);
                }
            }

            ui.add_space(10.0);
            ui.separator();

            ui.heading("View");
            if ui.button("Reset view").clicked() {
                state.reset_view_requested = true;
            }
            ui.label(RichText::new(format!("Zoom: {:.2}x", state.view.zoom)).small());

            ui.add_space(10.0);
            ui.separator();

            ui.label(
                RichText::new(format!(
                    "{} grid points at {}° spacing",
                    engine.grid_len(),
                    GRID_SPACING_DEGREES
                ))
                .small(),
            );
        });
}
