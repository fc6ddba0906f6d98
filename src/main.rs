#![warn(clippy::all)]

//! Projection Workbench - animated cartographic projection visualization.
//!
//! Renders a fixed geographic lattice under several map projections and
//! smoothly animates the lattice whenever the active projection changes.
//! The projection mathematics is delegated to a pluggable coordinate
//! transform provider.

mod engine;
mod geo;
mod proj;
mod state;
mod ui;

use eframe::egui;
use web_time::Instant;

use engine::{ProjectionAnimationEngine, GRID_SPACING_DEGREES};
use proj::{Proj4rsProvider, ProviderError, ProviderInitChannel};
use state::AppState;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Projection Workbench",
        native_options,
        Box::new(|cc| Ok(Box::new(ProjectionApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(ProjectionApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct ProjectionApp {
    /// Application state shared with the UI panels
    state: AppState,

    /// The projection animation engine
    engine: ProjectionAnimationEngine,

    /// Channel for the provider's one-shot readiness gate
    provider_init: ProviderInitChannel,
}

impl ProjectionApp {
    /// Creates the app and kicks off provider initialization.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let provider_init = ProviderInitChannel::new();
        provider_init.begin(cc.egui_ctx.clone());

        Self {
            state: AppState::new(),
            engine: ProjectionAnimationEngine::new(GRID_SPACING_DEGREES),
            provider_init,
        }
    }

    /// Handles the provider becoming ready, or failing to.
    fn handle_provider_result(&mut self, result: Result<Proj4rsProvider, ProviderError>) {
        match result {
            Ok(provider) => match self.engine.populate(&provider) {
                Ok(failures) => {
                    for (definition, e) in &failures {
                        log::error!("Projection {} unavailable: {}", definition.label(), e);
                    }
                    let total = proj::ProjectionDefinition::active().len();
                    log::info!(
                        "Projection cache populated: {} of {} projections",
                        total - failures.len(),
                        total
                    );
                    self.state.status_message = if failures.is_empty() {
                        "Ready".to_string()
                    } else {
                        format!("Ready ({} projections unavailable)", failures.len())
                    };
                }
                Err(e) => {
                    log::error!("Cache population failed: {}", e);
                    self.state.status_message = format!("Provider error: {}", e);
                }
            },
            Err(e) => {
                log::error!("Projection provider failed to initialize: {}", e);
                self.state.status_message = e.to_string();
            }
        }
    }
}

impl eframe::App for ProjectionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for provider readiness (one-shot)
        if let Some(result) = self.provider_init.try_recv() {
            self.handle_provider_result(result);
        }

        // Consume the UI's switch request
        if let Some(definition) = self.state.requested_projection.take() {
            if self.engine.switch_to(definition, Instant::now()) {
                self.state.status_message = format!("Animating to {}", definition.label());
            }
        }

        if self.state.reset_view_requested {
            self.state.reset_view_requested = false;
            self.state.view.reset();
        }

        // Advance the animation for this frame
        let was_animating = self.engine.is_animating();
        self.engine.tick(Instant::now());
        if was_animating && !self.engine.is_animating() {
            self.state.status_message =
                format!("Showing {}", self.engine.current_definition().label());
        }

        // Keep frames coming while a transition is in flight
        if self.engine.is_animating() {
            ctx.request_repaint();
        }

        // Side and top panels must be rendered before CentralPanel
        ui::render_top_bar(ctx, &mut self.state, &self.engine);
        ui::render_left_panel(ctx, &mut self.state, &self.engine);
        ui::render_canvas(ctx, &mut self.state, &self.engine);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // No frame may fire after teardown
        self.engine.dispose();
    }
}
