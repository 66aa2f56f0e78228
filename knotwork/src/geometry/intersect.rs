// Segment-segment intersection in f64 with tolerances.
// Distinguishes proper crossings, endpoint touches and collinear overlaps.

use crate::model::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegIntersection {
    None,
    // Interior crossing
    Proper { t: f64, u: f64, x: f64, y: f64 },
    // Meets within tolerance of an endpoint of either segment; t/u are unclamped
    Touch { t: f64, u: f64, x: f64, y: f64 },
    // Segments lie on one line and share a span
    CollinearOverlap,
}

#[derive(Clone, Copy)]
struct P {
    x: f64,
    y: f64,
}

impl From<Vec2> for P {
    fn from(v: Vec2) -> Self {
        P { x: v.x as f64, y: v.y as f64 }
    }
}

#[inline]
fn orient(a: P, b: P, c: P) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn straddles(o1: f64, o2: f64, eps: f64) -> bool {
    (o1 > 0.0 && o2 < 0.0) || (o1 < 0.0 && o2 > 0.0) || o1.abs() <= eps || o2.abs() <= eps
}

// Both segments on one line: report whether their projections overlap.
fn collinear(a: P, b: P, c: P, d: P, eps: f64) -> SegIntersection {
    let along_x = (b.x - a.x).abs() >= (b.y - a.y).abs();
    let proj = |p: P| if along_x { p.x } else { p.y };
    let (a0, a1) = (proj(a).min(proj(b)), proj(a).max(proj(b)));
    let (c0, c1) = (proj(c).min(proj(d)), proj(c).max(proj(d)));
    if a1 + eps < c0 || c1 + eps < a0 {
        SegIntersection::None
    } else {
        SegIntersection::CollinearOverlap
    }
}

/// Intersect `a..b` with `c..d`. `eps_pos` bounds orientation and endpoint slack,
/// `eps_denom` guards the parallel test.
pub fn intersect_segments(a: Vec2, b: Vec2, c: Vec2, d: Vec2, eps_pos: f32, eps_denom: f32) -> SegIntersection {
    let (a, b, c, d) = (P::from(a), P::from(b), P::from(c), P::from(d));
    let eps = eps_pos as f64;

    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    if o1.abs() <= eps && o2.abs() <= eps && o3.abs() <= eps && o4.abs() <= eps {
        return collinear(a, b, c, d, eps);
    }
    if !(straddles(o1, o2, eps) && straddles(o3, o4, eps)) {
        return SegIntersection::None;
    }

    let r = P { x: b.x - a.x, y: b.y - a.y };
    let s = P { x: d.x - c.x, y: d.y - c.y };
    let rxs = r.x * s.y - r.y * s.x;
    if rxs.abs() <= eps_denom as f64 {
        return SegIntersection::None;
    }
    let q = P { x: c.x - a.x, y: c.y - a.y };
    let t = (q.x * s.y - q.y * s.x) / rxs;
    let u = (q.x * r.y - q.y * r.x) / rxs;
    if t < -eps || t > 1.0 + eps || u < -eps || u > 1.0 + eps {
        return SegIntersection::None;
    }
    let x = a.x + t * r.x;
    let y = a.y + t * r.y;

    let near_end = |v: f64| v.abs() <= eps || (1.0 - v).abs() <= eps;
    if near_end(t) || near_end(u) {
        SegIntersection::Touch { t, u, x, y }
    } else {
        SegIntersection::Proper { t, u, x, y }
    }
}
