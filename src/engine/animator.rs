//! Frame-paced grid animation.
//!
//! Interpolates element-wise between two index-aligned projected grids over
//! a fixed duration, one emission per tick, with cooperative cancellation.

use web_time::{Duration, Instant};

use crate::geo::{PlanarPoint, ProjectedGrid};

/// Errors from starting an animation with unusable grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// A grid with no points cannot be animated.
    EmptyGrid,
    /// The grids are not index-aligned and cannot be interpolated.
    LengthMismatch { start: usize, end: usize },
}

impl std::fmt::Display for AnimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationError::EmptyGrid => write!(f, "Cannot animate an empty grid"),
            AnimationError::LengthMismatch { start, end } => {
                write!(f, "Grid lengths differ: {} vs {}", start, end)
            }
        }
    }
}

impl std::error::Error for AnimationError {}

/// Opaque handle identifying one started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle(u64);

/// One emission of an in-flight animation.
pub struct AnimationFrame {
    /// The interpolated grid for this frame.
    pub grid: ProjectedGrid,
    /// Normalized progress in [0, 1].
    pub mix: f64,
    /// Whether this is the final emission.
    pub finished: bool,
}

struct ActiveAnimation {
    id: u64,
    start_grid: ProjectedGrid,
    end_grid: ProjectedGrid,
    started_at: Instant,
    duration: Duration,
}

/// Drives the interpolation between two projected grids.
///
/// At most one animation is active at a time; starting a new one replaces
/// the previous. A cancelled or finished animation emits nothing further,
/// including for a frame already due.
#[derive(Default)]
pub struct GridAnimator {
    active: Option<ActiveAnimation>,
    next_id: u64,
}

impl GridAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins an animation from `start_grid` to `end_grid`.
    ///
    /// Fails fast when the grids cannot be interpolated element-wise.
    pub fn start(
        &mut self,
        start_grid: ProjectedGrid,
        end_grid: ProjectedGrid,
        duration: Duration,
        now: Instant,
    ) -> Result<AnimationHandle, AnimationError> {
        if start_grid.is_empty() || end_grid.is_empty() {
            return Err(AnimationError::EmptyGrid);
        }
        if start_grid.len() != end_grid.len() {
            return Err(AnimationError::LengthMismatch {
                start: start_grid.len(),
                end: end_grid.len(),
            });
        }

        self.next_id += 1;
        let id = self.next_id;
        self.active = Some(ActiveAnimation {
            id,
            start_grid,
            end_grid,
            started_at: now,
            duration,
        });
        Ok(AnimationHandle(id))
    }

    /// Advances the animation and emits the interpolated grid for `now`.
    ///
    /// Returns `None` when idle. The first emission equals the start grid,
    /// the final emission equals the end grid exactly, and the animation
    /// removes itself once the mix reaches 1.
    pub fn tick(&mut self, now: Instant) -> Option<AnimationFrame> {
        let mix = {
            let animation = self.active.as_ref()?;
            let elapsed = now.saturating_duration_since(animation.started_at);
            if animation.duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f64() / animation.duration.as_secs_f64()).clamp(0.0, 1.0)
            }
        };

        if mix >= 1.0 {
            // Exact arrival: hand back the end grid rather than a lerp of it
            let animation = self.active.take()?;
            return Some(AnimationFrame {
                grid: animation.end_grid,
                mix: 1.0,
                finished: true,
            });
        }

        let animation = self.active.as_ref()?;
        let grid = animation
            .start_grid
            .iter()
            .zip(&animation.end_grid)
            .map(|(a, b)| PlanarPoint {
                x: lerp(a.x, b.x, mix),
                y: lerp(a.y, b.y, mix),
            })
            .collect();
        Some(AnimationFrame {
            grid,
            mix,
            finished: false,
        })
    }

    /// Cancels the animation identified by `handle`.
    ///
    /// A stale handle, one from an animation already replaced or finished,
    /// is ignored.
    pub fn cancel(&mut self, handle: AnimationHandle) {
        if self
            .active
            .as_ref()
            .is_some_and(|animation| animation.id == handle.0)
        {
            self.active = None;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Handle of the in-flight animation, if any.
    pub fn active_handle(&self) -> Option<AnimationHandle> {
        self.active
            .as_ref()
            .map(|animation| AnimationHandle(animation.id))
    }
}

/// Linear interpolation, exact at `mix` 0 and 1 for finite endpoints.
pub fn lerp(a: f64, b: f64, mix: f64) -> f64 {
    a * (1.0 - mix) + b * mix
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(points: &[(f64, f64)]) -> ProjectedGrid {
        points
            .iter()
            .map(|&(x, y)| PlanarPoint { x, y })
            .collect()
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_lerp_is_exact_at_endpoints() {
        assert_eq!(lerp(3.5, 7.25, 0.0), 3.5);
        assert_eq!(lerp(3.5, 7.25, 1.0), 7.25);
        assert_eq!(lerp(-123.0, 456.0, 0.0), -123.0);
        assert_eq!(lerp(-123.0, 456.0, 1.0), 456.0);
    }

    #[test]
    fn test_lerp_midpoints() {
        assert_eq!(lerp(0.0, 100.0, 0.5), 50.0);
        assert_eq!(lerp(-10.0, 10.0, 0.25), -5.0);
    }

    #[test]
    fn test_first_emission_is_the_start_grid() {
        let start = grid(&[(0.0, 0.0), (10.0, -10.0)]);
        let end = grid(&[(100.0, 100.0), (110.0, 90.0)]);
        let t0 = Instant::now();

        let mut animator = GridAnimator::new();
        animator
            .start(start.clone(), end, millis(3000), t0)
            .unwrap();

        let frame = animator.tick(t0).unwrap();
        assert_eq!(frame.grid, start);
        assert_eq!(frame.mix, 0.0);
        assert!(!frame.finished);
    }

    #[test]
    fn test_midpoint_interpolation() {
        let start = grid(&[(0.0, 0.0)]);
        let end = grid(&[(100.0, -50.0)]);
        let t0 = Instant::now();

        let mut animator = GridAnimator::new();
        animator.start(start, end, millis(3000), t0).unwrap();

        let frame = animator.tick(t0 + millis(1500)).unwrap();
        assert_relative_eq!(frame.mix, 0.5, epsilon = 1e-9);
        assert_relative_eq!(frame.grid[0].x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(frame.grid[0].y, -25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_final_emission_is_the_end_grid_exactly() {
        let start = grid(&[(0.0, 0.0), (1.0, 2.0)]);
        let end = grid(&[(0.3, 0.7), (1.9, -2.1)]);
        let t0 = Instant::now();

        let mut animator = GridAnimator::new();
        animator
            .start(start, end.clone(), millis(3000), t0)
            .unwrap();

        let frame = animator.tick(t0 + millis(3000)).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.mix, 1.0);
        assert_eq!(frame.grid, end);

        // Self-terminated: no emission after completion
        assert!(animator.tick(t0 + millis(4000)).is_none());
        assert!(!animator.is_active());
    }

    #[test]
    fn test_mix_is_monotonically_non_decreasing() {
        let start = grid(&[(0.0, 0.0)]);
        let end = grid(&[(100.0, 100.0)]);
        let t0 = Instant::now();

        let mut animator = GridAnimator::new();
        animator.start(start, end, millis(3000), t0).unwrap();

        let mut mixes = Vec::new();
        for ms in [0, 400, 900, 1700, 2600, 3000] {
            if let Some(frame) = animator.tick(t0 + millis(ms)) {
                mixes.push(frame.mix);
            }
        }
        assert_eq!(mixes.len(), 6);
        assert!(mixes.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(*mixes.last().unwrap(), 1.0);
    }

    #[test]
    fn test_mix_clamps_past_the_duration() {
        let start = grid(&[(0.0, 0.0)]);
        let end = grid(&[(100.0, 100.0)]);
        let t0 = Instant::now();

        let mut animator = GridAnimator::new();
        animator
            .start(start, end.clone(), millis(1000), t0)
            .unwrap();

        let frame = animator.tick(t0 + millis(5000)).unwrap();
        assert_eq!(frame.mix, 1.0);
        assert_eq!(frame.grid, end);
    }

    #[test]
    fn test_cancel_stops_emissions() {
        let t0 = Instant::now();
        let mut animator = GridAnimator::new();
        let handle = animator
            .start(grid(&[(0.0, 0.0)]), grid(&[(1.0, 1.0)]), millis(3000), t0)
            .unwrap();

        animator.cancel(handle);
        assert!(!animator.is_active());
        assert!(animator.tick(t0 + millis(16)).is_none());
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let t0 = Instant::now();
        let mut animator = GridAnimator::new();
        let first = animator
            .start(grid(&[(0.0, 0.0)]), grid(&[(1.0, 1.0)]), millis(3000), t0)
            .unwrap();
        let second = animator
            .start(grid(&[(2.0, 2.0)]), grid(&[(3.0, 3.0)]), millis(3000), t0)
            .unwrap();
        assert_ne!(first, second);

        // Cancelling the replaced animation must not touch the live one
        animator.cancel(first);
        assert!(animator.is_active());
        assert_eq!(animator.active_handle(), Some(second));
        assert!(animator.tick(t0).is_some());
    }

    #[test]
    fn test_empty_grids_fail_fast() {
        let t0 = Instant::now();
        let mut animator = GridAnimator::new();
        let result = animator.start(grid(&[]), grid(&[(1.0, 1.0)]), millis(3000), t0);
        assert_eq!(result.unwrap_err(), AnimationError::EmptyGrid);
        assert!(!animator.is_active());
    }

    #[test]
    fn test_length_mismatch_fails_fast() {
        let t0 = Instant::now();
        let mut animator = GridAnimator::new();
        let result = animator.start(
            grid(&[(0.0, 0.0), (1.0, 1.0)]),
            grid(&[(1.0, 1.0)]),
            millis(3000),
            t0,
        );
        assert_eq!(
            result.unwrap_err(),
            AnimationError::LengthMismatch { start: 2, end: 1 }
        );
        assert!(!animator.is_active());
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let t0 = Instant::now();
        let end = grid(&[(5.0, 5.0)]);
        let mut animator = GridAnimator::new();
        animator
            .start(grid(&[(0.0, 0.0)]), end.clone(), millis(0), t0)
            .unwrap();

        let frame = animator.tick(t0).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.grid, end);
    }
}
