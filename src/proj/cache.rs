//! Per-projection cache of projected grids.
//!
//! Every active projection's grid is computed once, after the provider
//! reports ready, from the same geographic source grid. Entries are
//! read-only afterwards.

use std::collections::HashMap;

use geo_types::Coord;
use log::warn;

use super::{ProjectionDefinition, ProjectionProvider, TransformError};
use crate::geo::ProjectedGrid;

/// Cache of projected grids keyed by projection definition.
#[derive(Default)]
pub struct ProjectionCache {
    grids: HashMap<ProjectionDefinition, ProjectedGrid>,
    populated: bool,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes and stores the projected grid for every active definition.
    ///
    /// All definitions are projected from the same source grid, so the
    /// cached grids stay index-aligned with it and with each other. Failed
    /// definitions are returned for reporting and left absent; an empty or
    /// partial grid is never cached. Population happens once; repeat calls
    /// are ignored.
    pub fn populate(
        &mut self,
        provider: &dyn ProjectionProvider,
        grid: &[Coord<f64>],
    ) -> Vec<(ProjectionDefinition, TransformError)> {
        if self.populated {
            warn!("Projection cache already populated; ignoring repeat population");
            return Vec::new();
        }
        self.populated = true;

        let mut failures = Vec::new();
        for &definition in ProjectionDefinition::active() {
            let Some(spec) = definition.proj_string() else {
                continue;
            };
            match provider.transform(spec, grid) {
                Ok(projected) => {
                    self.grids.insert(definition, projected);
                }
                Err(e) => failures.push((definition, e)),
            }
        }
        failures
    }

    /// The cached grid for a definition, if its transform succeeded.
    pub fn get(&self, definition: ProjectionDefinition) -> Option<&ProjectedGrid> {
        self.grids.get(&definition)
    }

    /// Whether population has run, independent of per-definition failures.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Whether a non-empty grid is cached for the definition.
    pub fn has(&self, definition: ProjectionDefinition) -> bool {
        self.grids
            .get(&definition)
            .is_some_and(|grid| !grid.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{generate_grid, PlanarPoint};

    /// Scales degrees into fake plane meters; fails one optional spec.
    struct StubProvider {
        fail_spec: Option<&'static str>,
    }

    impl ProjectionProvider for StubProvider {
        fn is_ready(&self) -> bool {
            true
        }

        fn transform(
            &self,
            target_spec: &str,
            points: &[Coord<f64>],
        ) -> Result<ProjectedGrid, TransformError> {
            if Some(target_spec) == self.fail_spec {
                return Err(TransformError::Failed("stub failure".to_string()));
            }
            Ok(points
                .iter()
                .map(|p| PlanarPoint {
                    x: p.x * 100_000.0,
                    y: p.y * 100_000.0,
                })
                .collect())
        }
    }

    #[test]
    fn test_populate_caches_all_active_definitions() {
        let mut cache = ProjectionCache::new();
        let grid = generate_grid(30.0);
        let failures = cache.populate(&StubProvider { fail_spec: None }, &grid);

        assert!(failures.is_empty());
        assert!(cache.is_populated());
        for &definition in ProjectionDefinition::active() {
            assert!(cache.has(definition), "{}", definition.label());
            assert_eq!(cache.get(definition).unwrap().len(), grid.len());
        }
    }

    #[test]
    fn test_failed_definition_is_left_absent() {
        let mut cache = ProjectionCache::new();
        let grid = generate_grid(30.0);
        let failing = ProjectionDefinition::EqualEarth.proj_string().unwrap();
        let failures = cache.populate(
            &StubProvider {
                fail_spec: Some(failing),
            },
            &grid,
        );

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, ProjectionDefinition::EqualEarth);
        assert!(cache.get(ProjectionDefinition::EqualEarth).is_none());
        assert!(!cache.has(ProjectionDefinition::EqualEarth));
        assert!(cache.has(ProjectionDefinition::WebMercator));
        assert!(cache.has(ProjectionDefinition::VerticalPerspective));
    }

    #[test]
    fn test_populate_runs_once() {
        let mut cache = ProjectionCache::new();
        let grid = generate_grid(30.0);
        let failing = ProjectionDefinition::WebMercator.proj_string().unwrap();
        cache.populate(
            &StubProvider {
                fail_spec: Some(failing),
            },
            &grid,
        );
        assert!(!cache.has(ProjectionDefinition::WebMercator));

        // A repeat population cannot fill the failed entry in
        let failures = cache.populate(&StubProvider { fail_spec: None }, &grid);
        assert!(failures.is_empty());
        assert!(!cache.has(ProjectionDefinition::WebMercator));
    }

    #[test]
    fn test_not_populated_initially() {
        let cache = ProjectionCache::new();
        assert!(!cache.is_populated());
        assert!(!cache.has(ProjectionDefinition::WebMercator));
        assert!(cache.get(ProjectionDefinition::WebMercator).is_none());
    }

    #[test]
    fn test_reserved_definition_is_never_cached() {
        let mut cache = ProjectionCache::new();
        let grid = generate_grid(30.0);
        cache.populate(&StubProvider { fail_spec: None }, &grid);
        assert!(!cache.has(ProjectionDefinition::NaturalEarth));
    }
}
