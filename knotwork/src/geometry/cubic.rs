//! Cubic Bézier curve utilities.
//!
//! Every curve segment in a scene is evaluated through these helpers: the
//! flattener subdivides with them, hit testing searches them for the nearest
//! point, and the fitter evaluates candidate curves while reparameterizing.

use crate::geometry::math::lerp;
use crate::geometry::tolerance::{approx_eq, clamp01, EPS_POS};
use crate::model::{Rect, Vec2};

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn from_points(p: [Vec2; 4]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }

    /// True when both control points sit on the chord ends (a plain line).
    pub fn is_line(&self) -> bool {
        self.p1 == self.p0 && self.p2 == self.p3
    }

    /// True when all four control points coincide.
    pub fn is_point(&self) -> bool {
        let same = |a: Vec2, b: Vec2| approx_eq(a.x, b.x, EPS_POS) && approx_eq(a.y, b.y, EPS_POS);
        same(self.p0, self.p1) && same(self.p1, self.p2) && same(self.p2, self.p3)
    }

    /// Point at `t` in [0, 1] (Bernstein form).
    pub fn eval(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        let (b0, b1, b2, b3) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
        self.p0 * b0 + self.p1 * b1 + self.p2 * b2 + self.p3 * b3
    }

    /// First derivative at `t`.
    pub fn tangent(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * mt * mt)
            + (self.p2 - self.p1) * (6.0 * mt * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Second derivative at parameter t.
    pub fn second_derivative(&self, t: f32) -> Vec2 {
        let a = self.p2 - self.p1 * 2.0 + self.p0;
        let b = self.p3 - self.p2 * 2.0 + self.p1;
        (a * (1.0 - t) + b * t) * 6.0
    }

    /// De Casteljau split into the `0..t` and `t..1` halves.
    pub fn split_at(&self, t: f32) -> (CubicBezier, CubicBezier) {
        let a = lerp(self.p0, self.p1, t);
        let b = lerp(self.p1, self.p2, t);
        let c = lerp(self.p2, self.p3, t);
        let ab = lerp(a, b, t);
        let bc = lerp(b, c, t);
        let mid = lerp(ab, bc, t);
        (CubicBezier::new(self.p0, a, ab, mid), CubicBezier::new(mid, bc, c, self.p3))
    }

    /// Box around the control polygon; always contains the curve.
    pub fn hull_bounds(&self) -> Rect {
        let mut r = Rect::from_point(self.p0);
        r.include(self.p1);
        r.include(self.p2);
        r.include(self.p3);
        r
    }

    /// Nearest point on the curve to `p`: squared distance and parameter.
    ///
    /// Coarse sampling followed by a few rounds of interval shrinking around
    /// the best sample.
    pub fn nearest(&self, p: Vec2) -> (f32, f32) {
        if self.is_point() {
            return (p.dist_sq(self.p0), 0.0);
        }
        let n = 32;
        let mut best_t = 0.0;
        let mut best_d2 = f32::INFINITY;
        for i in 0..=n {
            let t = i as f32 / n as f32;
            let d2 = p.dist_sq(self.eval(t));
            if d2 < best_d2 {
                best_d2 = d2;
                best_t = t;
            }
        }
        let mut step = 1.0 / n as f32;
        for _ in 0..12 {
            step *= 0.5;
            for t in [best_t - step, best_t + step] {
                let t = clamp01(t);
                let d2 = p.dist_sq(self.eval(t));
                if d2 < best_d2 {
                    best_d2 = d2;
                    best_t = t;
                }
            }
        }
        (best_d2, best_t)
    }
}
