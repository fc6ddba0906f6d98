//! Geographic sample grid generation.

use geo_types::Coord;

use super::GeoGrid;

/// Generates a uniform geographic lattice covering the full globe.
///
/// Latitude runs -90..=90 in the outer loop and longitude -180..=180 in the
/// inner loop, both stepping by `spacing_degrees`. Boundary points are kept
/// as-is: both -180 and 180 longitude appear, so the antimeridian column is
/// present twice. Deterministic and pure.
///
/// # Panics
/// Panics if `spacing_degrees` is not a positive number, which would
/// otherwise loop forever.
pub fn generate_grid(spacing_degrees: f64) -> GeoGrid {
    assert!(
        spacing_degrees > 0.0,
        "grid spacing must be positive, got {}",
        spacing_degrees
    );

    let mut points = Vec::new();
    let mut lat = -90.0;
    while lat <= 90.0 {
        let mut lng = -180.0;
        while lng <= 180.0 {
            points.push(Coord { x: lng, y: lat });
            lng += spacing_degrees;
        }
        lat += spacing_degrees;
    }
    points
}

/// Clamps a latitude to Web Mercator's +/-85 degree limit.
#[allow(dead_code)] // Defined for future Mercator latitude limiting; the grid is not clamped.
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-85.0, 85.0)
}
