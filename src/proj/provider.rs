//! Projection transform provider.
//!
//! Isolates the proj4rs transform machinery behind a narrow capability
//! trait so the engine never touches provider types directly, plus a
//! channel that bridges the provider's one-shot readiness gate into the
//! synchronous update loop.

use eframe::egui;
use geo_types::Coord;
use log::debug;
use proj4rs::Proj;
use std::sync::mpsc::{channel, Receiver, Sender};

use super::GEOGRAPHIC_CRS;
use crate::geo::{PlanarPoint, ProjectedGrid};

/// Errors from provider initialization and readiness.
#[derive(Debug, Clone)]
pub enum ProviderError {
    /// The provider failed to become ready. Nothing can be cached or displayed.
    InitFailed(String),
    /// A transform was requested before the provider reported ready.
    NotReady,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::InitFailed(msg) => write!(f, "Provider initialization failed: {}", msg),
            ProviderError::NotReady => write!(f, "Provider is not ready"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Errors from a batch coordinate transform.
#[derive(Debug, Clone)]
pub enum TransformError {
    /// The target projection specification was not recognized.
    UnknownProjection(String),
    /// The transform rejected the whole batch; no partial result is kept.
    Failed(String),
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::UnknownProjection(msg) => write!(f, "Unknown projection: {}", msg),
            TransformError::Failed(msg) => write!(f, "Transform failed: {}", msg),
        }
    }
}

impl std::error::Error for TransformError {}

/// Capability interface over an external coordinate-transform service.
///
/// Implementations bind their geographic source CRS (WGS84 degrees) at
/// initialization; `transform` projects into the named target.
pub trait ProjectionProvider {
    /// Whether the provider is ready to service transforms.
    fn is_ready(&self) -> bool;

    /// Projects geographic `points` into the target projection.
    ///
    /// All-or-nothing per call: the result is index-aligned with `points`,
    /// or an error, never a shortened grid. Individual points outside the
    /// target projection's domain come back with infinite ordinates.
    fn transform(
        &self,
        target_spec: &str,
        points: &[Coord<f64>],
    ) -> Result<ProjectedGrid, TransformError>;
}

/// Transform provider backed by proj4rs.
pub struct Proj4rsProvider {
    /// Geographic source CRS, resolved once at initialization.
    source: Proj,
}

impl Proj4rsProvider {
    /// Initializes the provider, resolving the geographic source CRS.
    ///
    /// Initialization failure is distinct from an unknown target projection:
    /// a provider that cannot resolve WGS84 cannot transform anything.
    pub fn init() -> Result<Self, ProviderError> {
        let source = Proj::from_user_string(GEOGRAPHIC_CRS)
            .map_err(|e| ProviderError::InitFailed(format!("{}: {}", GEOGRAPHIC_CRS, e)))?;
        debug!("Projection provider ready (source {})", GEOGRAPHIC_CRS);
        Ok(Self { source })
    }
}

/// Marshals a geographic point into proj4rs's point-exchange format.
///
/// proj4rs consumes geographic coordinates as (longitude, latitude) tuples
/// in radians, even though the EPSG:4326 authority axis order is
/// latitude-first. The axis ordering and the degree conversion are decided
/// here and nowhere else.
fn marshal_geographic(point: Coord<f64>) -> (f64, f64) {
    (point.x.to_radians(), point.y.to_radians())
}

impl ProjectionProvider for Proj4rsProvider {
    fn is_ready(&self) -> bool {
        true
    }

    fn transform(
        &self,
        target_spec: &str,
        points: &[Coord<f64>],
    ) -> Result<ProjectedGrid, TransformError> {
        let target = Proj::from_user_string(target_spec)
            .map_err(|e| TransformError::UnknownProjection(format!("{}: {}", target_spec, e)))?;

        let mut projected = Vec::with_capacity(points.len());
        let mut rejected = 0usize;
        for point in points {
            let mut coord = marshal_geographic(*point);
            match proj4rs::transform::transform(&self.source, &target, &mut coord) {
                Ok(()) => projected.push(PlanarPoint {
                    x: coord.0,
                    y: coord.1,
                }),
                Err(_) => {
                    // Outside the projection's domain. Keep the slot so the
                    // grid stays index-aligned with its source.
                    rejected += 1;
                    projected.push(PlanarPoint {
                        x: f64::INFINITY,
                        y: f64::INFINITY,
                    });
                }
            }
        }

        if !points.is_empty() && rejected == points.len() {
            return Err(TransformError::Failed(format!(
                "{}: every point was rejected",
                target_spec
            )));
        }
        if rejected > 0 {
            debug!(
                "{} of {} points outside the domain of {}",
                rejected,
                points.len(),
                target_spec
            );
        }
        Ok(projected)
    }
}

/// Channel-based provider initialization.
///
/// Provider readiness is an asynchronous one-shot gate, but egui's update()
/// is synchronous. This struct runs initialization off the update loop and
/// passes the ready provider (or the failure) back through a channel.
pub struct ProviderInitChannel {
    sender: Sender<Result<Proj4rsProvider, ProviderError>>,
    receiver: Receiver<Result<Proj4rsProvider, ProviderError>>,
}

impl Default for ProviderInitChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderInitChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Begins provider initialization.
    ///
    /// On native: spawns a thread using pollster to block on the gate.
    /// On WASM: uses wasm_bindgen_futures::spawn_local.
    ///
    /// When initialization completes, the result is sent through the channel
    /// and ctx.request_repaint() is called to trigger a UI update.
    pub fn begin(&self, ctx: egui::Context) {
        let sender = self.sender.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = pollster::block_on(init_provider());
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = init_provider().await;
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }
    }

    /// Non-blocking check for a completed initialization.
    pub fn try_recv(&self) -> Option<Result<Proj4rsProvider, ProviderError>> {
        self.receiver.try_recv().ok()
    }
}

/// The provider's one-shot readiness gate, awaited once at startup.
async fn init_provider() -> Result<Proj4rsProvider, ProviderError> {
    Proj4rsProvider::init()
}
