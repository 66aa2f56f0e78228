//! Crossings between two flattened curves.
//!
//! Every chord of one polyline is tested against every chord of the other
//! after a box check. Chords own the half-open parameter range `[0, 1)`, so a
//! crossing that lands exactly on a shared polyline vertex is counted by one
//! chord only.

use crate::geometry::flatten::{FlatSegment, Polyline};
use crate::geometry::intersect::{intersect_segments, SegIntersection};
use crate::geometry::tolerance::{EPS_DENOM, EPS_LEN, EPS_POS};
use crate::model::{CurveLocation, Vec2};
use crate::provider::Crossing;

// Parametric slack for the half-open range test.
const EPS_T: f64 = 1e-9;

pub fn polyline_crossings(a: &Polyline, b: &Polyline) -> Vec<Crossing> {
    let mut out = Vec::new();
    let (Some(ba), Some(bb)) = (a.bounds, b.bounds) else {
        return out;
    };
    if !ba.inflate(EPS_POS).overlaps(&bb) {
        return out;
    }
    for sa in a.segments.iter().filter(|s| !is_degenerate(s)) {
        let box_a = sa.bounds().inflate(EPS_POS);
        if !box_a.overlaps(&bb) {
            continue;
        }
        for sb in b.segments.iter().filter(|s| !is_degenerate(s)) {
            if !box_a.overlaps(&sb.bounds()) {
                continue;
            }
            // Proper hits are interior to both chords; touches land on a chord end and go to one owner.
            let (t, u, x, y) = match intersect_segments(sa.start, sa.end, sb.start, sb.end, EPS_POS, EPS_DENOM) {
                SegIntersection::Proper { t, u, x, y } => (t, u, x, y),
                SegIntersection::Touch { t, u, x, y } if owns(t) && owns(u) => (t, u, x, y),
                _ => continue,
            };
            let point = Vec2::new(x as f32, y as f32);
            out.push(Crossing { point, location_a: locate(sa, t), location_b: locate(sb, u) });
        }
    }
    out
}

#[inline]
fn owns(t: f64) -> bool {
    t >= -EPS_T && t < 1.0 - EPS_T
}

#[inline]
fn is_degenerate(s: &FlatSegment) -> bool {
    s.start.dist_sq(s.end) <= EPS_LEN * EPS_LEN
}

fn locate(s: &FlatSegment, t: f64) -> CurveLocation {
    let t = t.clamp(0.0, 1.0) as f32;
    CurveLocation { segment: s.segment, t: s.t_start + t * (s.t_end - s.t_start) }
}
