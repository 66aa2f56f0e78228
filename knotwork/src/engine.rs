//! Pairwise intersection of every curve in a scene.
//!
//! [`IntersectionEngine::recompute`] is a pure function of the scene it is
//! handed: it visits each unordered pair of pairable curves exactly once
//! (index-based `i < j`), never pairs a curve with itself, concatenates what
//! the geometry provider reports without deduplicating, and only then swaps
//! the marker layer contents.

use log::debug;

use crate::geometry::tolerance::EPS_BBOX;
use crate::markers::MarkerLayer;
use crate::model::{Curve, CurveId, IntersectionPoint, Marker, Rect};
use crate::provider::{CurveGeometry, FlattenGeometry};
use crate::scene::SceneStore;

pub struct IntersectionEngine<G: CurveGeometry = FlattenGeometry> {
    geometry: G,
    layer: MarkerLayer,
    intersections: Vec<IntersectionPoint>,
    computed_ver: Option<u64>,
    prefilter: bool,
}

/// Counters from the last recompute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    pub curves: usize,
    pub pairs_queried: usize,
    pub pairs_skipped: usize,
    pub points: usize,
}

impl<G: CurveGeometry> IntersectionEngine<G> {
    pub fn new(geometry: G, layer: MarkerLayer) -> Self {
        IntersectionEngine { geometry, layer, intersections: Vec::new(), computed_ver: None, prefilter: true }
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    pub fn layer(&self) -> &MarkerLayer {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut MarkerLayer {
        &mut self.layer
    }

    /// Skip pairs whose provider boxes do not touch.
    pub fn set_prefilter(&mut self, on: bool) {
        self.prefilter = on;
    }

    pub fn markers(&self) -> &[Marker] {
        self.layer.markers()
    }

    pub fn intersections(&self) -> &[IntersectionPoint] {
        &self.intersections
    }

    /// Scene version seen by the last recompute.
    pub fn computed_version(&self) -> Option<u64> {
        self.computed_ver
    }

    pub fn is_stale(&self, scene: &SceneStore) -> bool {
        self.computed_ver != Some(scene.version())
    }

    /// Rebuild intersections and markers from `scene`; returns the point count.
    pub fn recompute(&mut self, scene: &SceneStore) -> usize {
        self.recompute_with_stats(scene).points
    }

    pub fn recompute_with_stats(&mut self, scene: &SceneStore) -> RecomputeStats {
        let pairable: Vec<(CurveId, &Curve)> = scene.curves().filter(|(_, c)| c.is_pairable()).collect();
        let boxes: Vec<Option<Rect>> = pairable
            .iter()
            .map(|(_, c)| if self.prefilter { self.geometry.bounds(c).map(|r| r.inflate(EPS_BBOX)) } else { None })
            .collect();

        let mut stats = RecomputeStats { curves: pairable.len(), ..Default::default() };
        let mut found = Vec::new();
        for i in 0..pairable.len() {
            for j in i + 1..pairable.len() {
                if let (Some(a), Some(b)) = (&boxes[i], &boxes[j]) {
                    if !a.overlaps(b) {
                        stats.pairs_skipped += 1;
                        continue;
                    }
                }
                stats.pairs_queried += 1;
                let (id_a, a) = pairable[i];
                let (id_b, b) = pairable[j];
                found.extend(self.geometry.intersections(a, b).into_iter().map(|c| IntersectionPoint {
                    curves: (id_a, id_b),
                    point: c.point,
                    location_a: c.location_a,
                    location_b: c.location_b,
                }));
            }
        }
        stats.points = found.len();

        // Swap only once everything is known.
        self.layer.clear();
        for p in &found {
            self.layer.add_marker(p.point);
        }
        self.intersections = found;
        self.computed_ver = Some(scene.version());
        debug!(
            "recompute: {} curves, {} pairs queried, {} skipped, {} points",
            stats.curves, stats.pairs_queried, stats.pairs_skipped, stats.points
        );
        stats
    }

    /// Drop all markers and intersections, as after clearing `scene`.
    pub fn clear(&mut self, scene: &SceneStore) {
        self.layer.clear();
        self.intersections.clear();
        self.computed_ver = Some(scene.version());
    }
}
