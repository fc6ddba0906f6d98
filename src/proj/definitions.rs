//! Named projection definitions and their provider specifications.

/// Geographic source CRS for every transform: WGS84 degrees (EPSG:4326).
pub const GEOGRAPHIC_CRS: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Projections known to the workbench.
///
/// `NaturalEarth` is reserved: it has no active provider specification and
/// is wired to neither the cache nor the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionDefinition {
    EqualEarth,
    WebMercator,
    VerticalPerspective,
    NaturalEarth,
}

impl ProjectionDefinition {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectionDefinition::EqualEarth => "Equal Earth",
            ProjectionDefinition::WebMercator => "Web Mercator",
            ProjectionDefinition::VerticalPerspective => "Vertical Perspective",
            ProjectionDefinition::NaturalEarth => "Natural Earth",
        }
    }

    /// Projection specification string consumed by the transform provider.
    ///
    /// Returns `None` for reserved definitions.
    pub fn proj_string(&self) -> Option<&'static str> {
        match self {
            ProjectionDefinition::EqualEarth => {
                Some("+proj=eqearth +datum=WGS84 +units=m +no_defs")
            }
            ProjectionDefinition::WebMercator => {
                // Spherical Mercator on the WGS84 radius (EPSG:3857)
                Some("+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +units=m +no_defs")
            }
            ProjectionDefinition::VerticalPerspective => {
                // Geostationary view from 35786 km above the equator
                Some("+proj=geos +lat_0=0 +lon_0=0 +h=35785831 +datum=WGS84 +units=m +no_defs")
            }
            ProjectionDefinition::NaturalEarth => None,
        }
    }

    /// The selectable projections, in display order.
    pub fn active() -> &'static [ProjectionDefinition] {
        &[
            ProjectionDefinition::EqualEarth,
            ProjectionDefinition::WebMercator,
            ProjectionDefinition::VerticalPerspective,
        ]
    }
}
