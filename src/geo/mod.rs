//! Geographic and planar coordinate model.
//!
//! Geographic points use `geo_types::Coord` with `x` = longitude and
//! `y` = latitude, in degrees. Planar points are projection output in
//! linear units (meters).

mod grid;
mod viewport;

pub use grid::generate_grid;
pub use viewport::PlaneViewport;

use geo_types::Coord;

/// The fixed geographic lattice sampled once at startup.
pub type GeoGrid = Vec<Coord<f64>>;

/// A point in projected plane coordinates.
///
/// Produced by the projection provider, or by interpolating between two
/// provider outputs. Non-finite ordinates mark points the provider could
/// not project; the renderer skips them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

/// A projected grid, index-aligned with the `GeoGrid` it was computed from.
///
/// `grid[i]` is the image of the geographic point at index `i`. Two
/// projected grids may only be interpolated element-wise when they share
/// this alignment: same length, same source order.
pub type ProjectedGrid = Vec<PlanarPoint>;
