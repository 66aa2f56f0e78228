//! Curve geometry queries the core depends on.
//!
//! The engine and the controller only talk to geometry through
//! [`CurveGeometry`]; [`FlattenGeometry`] is the implementation used by the
//! drawing surface, and tests substitute their own.

use serde::{Deserialize, Serialize};

use crate::algorithms::{crossings, picking};
use crate::geometry::cubic::CubicBezier;
use crate::geometry::flatten::flatten_curve;
use crate::model::{Curve, CurveId, CurveLocation, Rect, Vec2};
use crate::scene::SceneStore;

/// One place where two curves cross.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub point: Vec2,
    pub location_a: CurveLocation,
    pub location_b: CurveLocation,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Hit {
    #[serde(rename = "anchor")]
    Anchor { curve: CurveId, index: usize, dist: f32 },
    #[serde(rename = "stroke")]
    Stroke { curve: CurveId, location: CurveLocation, point: Vec2, dist: f32 },
}

impl Hit {
    pub fn curve(&self) -> CurveId {
        match *self {
            Hit::Anchor { curve, .. } | Hit::Stroke { curve, .. } => curve,
        }
    }
}

pub trait CurveGeometry {
    /// Points where `a` and `b` cross, with their locations on each curve.
    /// Degenerate or disjoint input yields an empty list.
    fn intersections(&self, a: &Curve, b: &Curve) -> Vec<Crossing>;

    /// A box containing the whole curve. `None` disables box rejection for it.
    fn bounds(&self, _curve: &Curve) -> Option<Rect> {
        None
    }

    /// What lies under `at` within `tolerance`.
    fn hit_test(&self, _scene: &SceneStore, _at: Vec2, _tolerance: f32) -> Option<Hit> {
        None
    }
}

/// Flattens cubic segments to polylines and intersects those.
#[derive(Clone, Debug)]
pub struct FlattenGeometry {
    tolerance: f32,
}

impl FlattenGeometry {
    pub fn new(tolerance: f32) -> Self {
        FlattenGeometry { tolerance }
    }
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }
    pub fn set_tolerance(&mut self, tolerance: f32) {
        self.tolerance = tolerance;
    }
}

impl Default for FlattenGeometry {
    fn default() -> Self {
        FlattenGeometry::new(0.25)
    }
}

impl CurveGeometry for FlattenGeometry {
    fn intersections(&self, a: &Curve, b: &Curve) -> Vec<Crossing> {
        let pa = flatten_curve(a, self.tolerance);
        let pb = flatten_curve(b, self.tolerance);
        crossings::polyline_crossings(&pa, &pb)
    }

    fn bounds(&self, curve: &Curve) -> Option<Rect> {
        let mut out: Option<Rect> = None;
        for i in 0..curve.segment_count() {
            if let Some(p) = curve.segment(i) {
                let hull = CubicBezier::from_points(p).hull_bounds();
                match out.as_mut() {
                    Some(r) => {
                        r.include(hull.min);
                        r.include(hull.max);
                    }
                    None => out = Some(hull),
                }
            }
        }
        out
    }

    fn hit_test(&self, scene: &SceneStore, at: Vec2, tolerance: f32) -> Option<Hit> {
        picking::hit_test_impl(scene, at, tolerance)
    }
}
