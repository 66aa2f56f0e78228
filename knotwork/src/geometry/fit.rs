//! Freehand stroke simplification.
//!
//! Fits a chain of cubic Béziers through sampled pointer positions using
//! least squares with fixed end tangents. A fit is accepted when every sample
//! lies within the error budget; otherwise the samples are reparameterized by
//! Newton steps a few times and, failing that, split at the worst sample and
//! fitted as two halves.
//!
//! The error budget is compared against *squared* distances, so a tolerance
//! of 10 allows roughly 3.2 px of deviation.

use crate::geometry::cubic::CubicBezier;
use crate::geometry::math::normalize;
use crate::geometry::tolerance::{EPS_DENOM, EPS_POS, MAX_FIT_DEPTH, MAX_FIT_REPARAM};
use crate::model::{Anchor, Vec2};

/// Simplify `points` into anchors with handles.
///
/// Fewer than three distinct points come back as plain corner anchors.
pub fn fit_points(points: &[Vec2], tolerance: f32) -> Vec<Anchor> {
    let mut pts: Vec<Vec2> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last().map_or(true, |&q: &Vec2| q.dist_sq(p) > EPS_POS * EPS_POS) {
            pts.push(p);
        }
    }
    if pts.len() < 3 {
        return pts.into_iter().map(Anchor::corner).collect();
    }
    let last = pts.len() - 1;
    let mut out = vec![Anchor::corner(pts[0])];
    let fitter = Fitter { pts: &pts, error: tolerance.max(EPS_POS) };
    let tan1 = normalize(pts[1] - pts[0]);
    let tan2 = normalize(pts[last - 1] - pts[last]);
    fitter.fit(&mut out, 0, last, tan1, tan2, 0);
    out
}

struct Fitter<'a> {
    pts: &'a [Vec2],
    error: f32,
}

impl Fitter<'_> {
    fn fit(&self, out: &mut Vec<Anchor>, first: usize, last: usize, tan1: Vec2, tan2: Vec2, depth: u32) {
        if last - first == 1 || depth >= MAX_FIT_DEPTH {
            let (p1, p2) = (self.pts[first], self.pts[last]);
            let third = p1.dist_sq(p2).sqrt() / 3.0;
            push_curve(out, &CubicBezier::new(p1, p1 + tan1 * third, p2 + tan2 * third, p2));
            return;
        }

        let mut u = self.chord_params(first, last);
        let mut max_error = self.error.max(self.error * self.error);
        let mut split = first + (last - first) / 2;
        for _ in 0..=MAX_FIT_REPARAM {
            let curve = self.generate(first, last, &u, tan1, tan2);
            let (err, idx) = self.max_error(first, last, &curve, &u);
            split = idx;
            if err < self.error && in_order(&u) {
                push_curve(out, &curve);
                return;
            }
            if err >= max_error {
                break;
            }
            self.reparameterize(first, last, &mut u, &curve);
            max_error = err;
        }

        let center = normalize(self.pts[split - 1] - self.pts[split + 1]);
        self.fit(out, first, split, tan1, center, depth + 1);
        self.fit(out, split, last, -center, tan2, depth + 1);
    }

    fn chord_params(&self, first: usize, last: usize) -> Vec<f32> {
        let mut u = vec![0.0f32; last - first + 1];
        for i in first + 1..=last {
            u[i - first] = u[i - first - 1] + self.pts[i].dist_sq(self.pts[i - 1]).sqrt();
        }
        let total = u[last - first];
        if total > EPS_DENOM {
            for v in u.iter_mut() {
                *v /= total;
            }
        }
        u
    }

    // Least-squares handle lengths along fixed tangents.
    fn generate(&self, first: usize, last: usize, u: &[f32], tan1: Vec2, tan2: Vec2) -> CubicBezier {
        let (pt1, pt2) = (self.pts[first], self.pts[last]);
        let mut c = [[0.0f64; 2]; 2];
        let mut x = [0.0f64; 2];
        for (i, &ui) in u.iter().enumerate() {
            let t = 1.0 - ui;
            let b = 3.0 * ui * t;
            let (b0, b1, b2, b3) = (t * t * t, b * t, b * ui, ui * ui * ui);
            let a1 = tan1 * b1;
            let a2 = tan2 * b2;
            let tmp = self.pts[first + i] - pt1 * (b0 + b1) - pt2 * (b2 + b3);
            c[0][0] += a1.dot(a1) as f64;
            c[0][1] += a1.dot(a2) as f64;
            c[1][1] += a2.dot(a2) as f64;
            x[0] += a1.dot(tmp) as f64;
            x[1] += a2.dot(tmp) as f64;
        }
        c[1][0] = c[0][1];

        let eps = EPS_DENOM as f64;
        let det = c[0][0] * c[1][1] - c[1][0] * c[0][1];
        let (mut alpha1, mut alpha2) = if det.abs() > eps {
            ((x[0] * c[1][1] - x[1] * c[0][1]) / det, (c[0][0] * x[1] - c[1][0] * x[0]) / det)
        } else {
            let c0 = c[0][0] + c[0][1];
            let c1 = c[1][0] + c[1][1];
            let a = if c0.abs() > eps { x[0] / c0 } else if c1.abs() > eps { x[1] / c1 } else { 0.0 };
            (a, a)
        };

        let seg_len = pt1.dist_sq(pt2).sqrt() as f64;
        let fallback = seg_len / 3.0;
        if alpha1 < eps * seg_len || alpha2 < eps * seg_len {
            alpha1 = fallback;
            alpha2 = fallback;
        } else {
            // Handles that overshoot past each other make loops; fall back to thirds.
            let line = pt2 - pt1;
            let h1 = tan1 * alpha1 as f32;
            let h2 = tan2 * alpha2 as f32;
            if (h1.dot(line) - h2.dot(line)) as f64 > seg_len * seg_len {
                alpha1 = fallback;
                alpha2 = fallback;
            }
        }
        CubicBezier::new(pt1, pt1 + tan1 * alpha1 as f32, pt2 + tan2 * alpha2 as f32, pt2)
    }

    fn max_error(&self, first: usize, last: usize, curve: &CubicBezier, u: &[f32]) -> (f32, usize) {
        let mut index = first + (last - first) / 2;
        let mut max = 0.0f32;
        for i in first + 1..last {
            let d2 = curve.eval(u[i - first]).dist_sq(self.pts[i]);
            if d2 >= max {
                max = d2;
                index = i;
            }
        }
        (max, index)
    }

    // One Newton step per sample towards its nearest point on `curve`.
    fn reparameterize(&self, first: usize, last: usize, u: &mut [f32], curve: &CubicBezier) {
        for i in first..=last {
            let ui = u[i - first];
            let diff = curve.eval(ui) - self.pts[i];
            let d1 = curve.tangent(ui);
            let d2 = curve.second_derivative(ui);
            let df = d1.dot(d1) + diff.dot(d2);
            if df.abs() > EPS_DENOM {
                u[i - first] = ui - diff.dot(d1) / df;
            }
        }
    }
}

fn in_order(u: &[f32]) -> bool {
    u.windows(2).all(|w| w[1] > w[0])
}

fn push_curve(out: &mut Vec<Anchor>, c: &CubicBezier) {
    if let Some(prev) = out.last_mut() {
        prev.handle_out = c.p1 - c.p0;
    }
    out.push(Anchor { point: c.p3, handle_in: c.p2 - c.p3, handle_out: Vec2::ZERO });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::flatten::flatten_curve;
    use crate::model::{Color, Curve};

    fn circle_samples(n: usize, r: f32) -> Vec<Vec2> {
        (0..=n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec2::new(200.0 + r * a.cos(), 200.0 + r * a.sin())
            })
            .collect()
    }

    #[test]
    fn straight_drag_collapses_to_two_anchors() {
        let pts: Vec<Vec2> = (0..50).map(|i| Vec2::new(i as f32 * 2.0, 10.0)).collect();
        let anchors = fit_points(&pts, 10.0);
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].point, pts[0]);
        assert_eq!(anchors[1].point, pts[49]);
    }

    #[test]
    fn dense_circle_is_reduced_and_stays_close() {
        let pts = circle_samples(360, 100.0);
        let anchors = fit_points(&pts, 10.0);
        assert!(anchors.len() >= 3 && anchors.len() < 40, "got {} anchors", anchors.len());

        let curve = Curve::new(anchors, false, Color::BLACK, 2.0);
        let poly = flatten_curve(&curve, 0.1);
        for p in &pts {
            let best = poly
                .segments
                .iter()
                .map(|s| crate::geometry::math::dist_point_to_seg_sq(*p, s.start, s.end))
                .fold(f32::INFINITY, f32::min);
            assert!(best.sqrt() < 4.0, "sample {:?} is {} px away", p, best.sqrt());
        }
    }

    #[test]
    fn repeated_points_are_collapsed() {
        let p = Vec2::new(3.0, 4.0);
        let anchors = fit_points(&[p, p, p], 10.0);
        assert_eq!(anchors, vec![Anchor::corner(p)]);
        assert!(fit_points(&[], 10.0).is_empty());
    }
}
