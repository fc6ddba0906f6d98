//! The projection animation engine.
//!
//! Owns the geographic grid, the per-projection cache, the animator, and
//! the grid currently on display, and mediates every projection switch.
//! The engine is either idle on one projection or animating toward one,
//! never both; each switch cancels the previous animation before starting
//! the next.

mod animator;

pub use animator::{lerp, AnimationError, AnimationFrame, AnimationHandle, GridAnimator};

use log::{debug, error, info};
use web_time::{Duration, Instant};

use crate::geo::{self, GeoGrid, PlanarPoint, ProjectedGrid};
use crate::proj::{
    ProjectionCache, ProjectionDefinition, ProjectionProvider, ProviderError, TransformError,
};

/// Geographic grid spacing in degrees.
pub const GRID_SPACING_DEGREES: f64 = 10.0;

/// How long a projection transition runs.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(3000);

/// An in-flight projection switch.
struct Transition {
    from: ProjectionDefinition,
    to: ProjectionDefinition,
    handle: AnimationHandle,
}

/// State manager for the projection display.
pub struct ProjectionAnimationEngine {
    /// The fixed geographic lattice, shared by every projection.
    geo_grid: GeoGrid,
    cache: ProjectionCache,
    animator: GridAnimator,
    /// Definition shown while idle; the last completed target while animating.
    current: ProjectionDefinition,
    /// Grid currently on display, overwritten by every animation frame.
    display: ProjectedGrid,
    transition: Option<Transition>,
}

impl ProjectionAnimationEngine {
    /// Creates an engine idle on Web Mercator with nothing on display.
    pub fn new(spacing_degrees: f64) -> Self {
        let geo_grid = geo::generate_grid(spacing_degrees);
        info!(
            "Generated geographic grid: {} points at {}° spacing",
            geo_grid.len(),
            spacing_degrees
        );
        Self {
            geo_grid,
            cache: ProjectionCache::new(),
            animator: GridAnimator::new(),
            current: ProjectionDefinition::WebMercator,
            display: Vec::new(),
            transition: None,
        }
    }

    /// Projects the grid under every active definition and fills the cache.
    ///
    /// Requires a ready provider. Failed definitions are returned for
    /// reporting; their cache entries stay absent and the matching switch
    /// commands remain no-ops. On return the display holds the current
    /// definition's grid, when its transform succeeded.
    pub fn populate(
        &mut self,
        provider: &dyn ProjectionProvider,
    ) -> Result<Vec<(ProjectionDefinition, TransformError)>, ProviderError> {
        if !provider.is_ready() {
            return Err(ProviderError::NotReady);
        }
        let failures = self.cache.populate(provider, &self.geo_grid);
        if let Some(grid) = self.cache.get(self.current) {
            self.display = grid.clone();
        }
        Ok(failures)
    }

    /// Requests a switch to `definition`, animating from whatever is on
    /// display. Returns whether a transition started.
    ///
    /// Requests for projections without a cached grid, and idle requests
    /// for the projection already shown, are silent no-ops. Switching while
    /// a transition is in flight cancels it and animates onward from the
    /// mid-flight display.
    pub fn switch_to(&mut self, definition: ProjectionDefinition, now: Instant) -> bool {
        if !self.cache.is_populated() {
            debug!(
                "Ignoring switch to {}: projections not cached yet",
                definition.label()
            );
            return false;
        }
        let Some(end_grid) = self
            .cache
            .get(definition)
            .filter(|grid| !grid.is_empty())
            .cloned()
        else {
            debug!("Ignoring switch to {}: no cached grid", definition.label());
            return false;
        };
        if self.transition.is_none() && self.current == definition {
            debug!("Already showing {}", definition.label());
            return false;
        }

        // Cancel before starting: at most one animation may be live
        if let Some(transition) = self.transition.take() {
            debug!(
                "Retargeting mid-flight: {} -> {} becomes -> {}",
                transition.from.label(),
                transition.to.label(),
                definition.label()
            );
            self.animator.cancel(transition.handle);
        }

        if self.display.is_empty() {
            // Nothing on display to animate from: set the grid directly
            info!("Showing {} without animation", definition.label());
            self.display = end_grid;
            self.current = definition;
            return false;
        }

        let from = self.current;
        match self
            .animator
            .start(self.display.clone(), end_grid, TRANSITION_DURATION, now)
        {
            Ok(handle) => {
                info!("Animating {} -> {}", from.label(), definition.label());
                self.transition = Some(Transition {
                    from,
                    to: definition,
                    handle,
                });
                true
            }
            Err(e) => {
                error!(
                    "Cannot animate {} -> {}: {}",
                    from.label(),
                    definition.label(),
                    e
                );
                false
            }
        }
    }

    /// Advances the active animation for the current frame.
    ///
    /// Each emission overwrites the display; on natural completion the
    /// engine returns to idle on the target definition with the display
    /// equal to that definition's cached grid, exactly.
    pub fn tick(&mut self, now: Instant) {
        let Some(frame) = self.animator.tick(now) else {
            return;
        };
        self.display = frame.grid;
        if frame.finished {
            if let Some(transition) = self.transition.take() {
                info!("Transition complete: showing {}", transition.to.label());
                self.current = transition.to;
            }
        }
    }

    /// Cancels any in-flight animation.
    ///
    /// The display keeps its last contents; no later tick can mutate it
    /// until a new switch is requested.
    pub fn dispose(&mut self) {
        if let Some(transition) = self.transition.take() {
            debug!(
                "Cancelling in-flight transition to {}",
                transition.to.label()
            );
            self.animator.cancel(transition.handle);
        }
        debug_assert!(!self.animator.is_active());
    }

    /// The grid currently on display.
    pub fn display(&self) -> &[PlanarPoint] {
        &self.display
    }

    /// Number of points in the geographic grid.
    pub fn grid_len(&self) -> usize {
        self.geo_grid.len()
    }

    /// Whether the projection cache has been populated.
    pub fn is_ready(&self) -> bool {
        self.cache.is_populated()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether a switch to `definition` has a cached grid to land on.
    pub fn has_projection(&self, definition: ProjectionDefinition) -> bool {
        self.cache.has(definition)
    }

    /// Definition shown while idle.
    pub fn current_definition(&self) -> ProjectionDefinition {
        self.current
    }

    /// Definition currently shown, or being animated toward.
    pub fn target_definition(&self) -> ProjectionDefinition {
        self.transition
            .as_ref()
            .map(|transition| transition.to)
            .unwrap_or(self.current)
    }

    /// Handle of the in-flight animation, if any.
    #[allow(dead_code)] // Exercised by the lifecycle tests
    pub fn active_handle(&self) -> Option<AnimationHandle> {
        self.animator.active_handle()
    }
}
