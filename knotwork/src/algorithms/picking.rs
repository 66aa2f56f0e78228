use crate::geometry::cubic::CubicBezier;
use crate::geometry::math::{lerp, seg_distance_sq};
use crate::model::{CurveLocation, Vec2};
use crate::provider::Hit;
use crate::scene::SceneStore;

// Anchors win over strokes; among equals the later (topmost) curve wins.
pub fn hit_test_impl(scene: &SceneStore, at: Vec2, tol: f32) -> Option<Hit> {
    if !at.is_finite() || !tol.is_finite() || tol < 0.0 {
        return None;
    }
    let tol2 = tol * tol;
    // Anchors first
    let mut best_anchor = None;
    let mut best_d2 = f32::INFINITY;
    for (id, c) in scene.curves() {
        for (i, a) in c.anchors.iter().enumerate() {
            let d2 = a.point.dist_sq(at);
            if d2 <= tol2 && d2 <= best_d2 {
                best_d2 = d2;
                best_anchor = Some((id, i));
            }
        }
    }
    if let Some((curve, index)) = best_anchor {
        return Some(Hit::Anchor { curve, index, dist: best_d2.sqrt() });
    }
    // Strokes, widened by half the stroke width
    let mut best_stroke = None;
    let mut best_d = f32::INFINITY;
    for (id, c) in scene.curves() {
        let reach = tol + 0.5 * c.stroke_width.max(0.0);
        for i in 0..c.segment_count() {
            let cb = match c.segment(i) {
                Some(p) => CubicBezier::from_points(p),
                None => continue,
            };
            let (d2, t, foot) = if cb.is_line() {
                let (d2, t) = seg_distance_sq(at, cb.p0, cb.p3);
                (d2, t, lerp(cb.p0, cb.p3, t))
            } else {
                let (d2, t) = cb.nearest(at);
                (d2, t, cb.eval(t))
            };
            let d = d2.sqrt();
            if d <= reach && d <= best_d {
                best_d = d;
                best_stroke = Some((id, CurveLocation { segment: i, t }, foot));
            }
        }
    }
    best_stroke.map(|(curve, location, point)| Hit::Stroke { curve, location, point, dist: best_d })
}
