use crate::geometry::tolerance::EPS_LEN;
use crate::model::Vec2;

/// Squared distance from `p` to segment `a..b` and the clamped parameter of the foot point.
pub fn seg_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let v = b - a;
    let w = p - a;
    let vv = v.dot(v);
    let t = if vv > 0.0 { (w.dot(v) / vv).clamp(0.0, 1.0) } else { 0.0 };
    let proj = a + v * t;
    (p.dist_sq(proj), t)
}

pub fn dist_point_to_seg_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let (d2, _) = seg_distance_sq(p, a, b);
    d2
}

#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Unit vector along `v`, or zero when `v` is too short to have a direction.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > EPS_LEN { v * (1.0 / len) } else { Vec2::ZERO }
}
