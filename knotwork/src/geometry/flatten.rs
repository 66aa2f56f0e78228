use crate::geometry::cubic::CubicBezier;
use crate::geometry::math::dist_point_to_seg_sq;
use crate::geometry::tolerance::MAX_FLATTEN_DEPTH;
use crate::model::{Curve, Rect, Vec2};

/// One chord of a flattened curve, tagged with the curve segment it came from
/// and the cubic parameter range it spans there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub segment: usize,
    pub t_start: f32,
    pub t_end: f32,
}

impl FlatSegment {
    pub fn bounds(&self) -> Rect {
        let mut r = Rect::from_point(self.start);
        r.include(self.end);
        r
    }
}

/// Flattened form of a whole curve plus its box.
#[derive(Clone, Debug, Default)]
pub struct Polyline {
    pub segments: Vec<FlatSegment>,
    pub bounds: Option<Rect>,
}

/// Push the points after `c.p0` of an adaptive flattening of `c`, each with its parameter.
pub fn flatten_cubic(points: &mut Vec<(Vec2, f32)>, c: &CubicBezier, tol: f32) {
    if c.is_line() {
        points.push((c.p3, 1.0));
        return;
    }
    flatten_rec(points, c, 0.0, 1.0, tol * tol, 0);
}

fn flatten_rec(points: &mut Vec<(Vec2, f32)>, c: &CubicBezier, t0: f32, t1: f32, tol2: f32, depth: u32) {
    let d1 = dist_point_to_seg_sq(c.p1, c.p0, c.p3);
    let d2 = dist_point_to_seg_sq(c.p2, c.p0, c.p3);
    if d1.max(d2) <= tol2 || depth >= MAX_FLATTEN_DEPTH {
        points.push((c.p3, t1));
        return;
    }
    let tm = 0.5 * (t0 + t1);
    let (left, right) = c.split_at(0.5);
    flatten_rec(points, &left, t0, tm, tol2, depth + 1);
    flatten_rec(points, &right, tm, t1, tol2, depth + 1);
}

/// Flatten every segment of `curve`, including the closing one when closed.
pub fn flatten_curve(curve: &Curve, tol: f32) -> Polyline {
    let mut out = Polyline::default();
    let mut pts: Vec<(Vec2, f32)> = Vec::new();
    for i in 0..curve.segment_count() {
        let c = match curve.segment(i) {
            Some(p) => CubicBezier::from_points(p),
            None => continue,
        };
        pts.clear();
        flatten_cubic(&mut pts, &c, tol);
        let mut prev = (c.p0, 0.0);
        for &(p, t) in &pts {
            let seg = FlatSegment { start: prev.0, end: p, segment: i, t_start: prev.1, t_end: t };
            match out.bounds.as_mut() {
                Some(b) => {
                    b.include(seg.start);
                    b.include(seg.end);
                }
                None => out.bounds = Some(seg.bounds()),
            }
            out.segments.push(seg);
            prev = (p, t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Anchor, Color};

    #[test]
    fn straight_segments_stay_single_chords() {
        let square = Curve::polygon(
            &[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)],
            Color::BLACK,
            1.0,
        );
        let poly = flatten_curve(&square, 0.25);
        assert_eq!(poly.segments.len(), 4);
        assert_eq!(poly.segments[3].end, Vec2::new(0.0, 0.0));
        let b = poly.bounds.unwrap();
        assert_eq!((b.min, b.max), (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn curved_segment_parameters_are_monotonic() {
        let a = Anchor { point: Vec2::new(0.0, 0.0), handle_in: Vec2::ZERO, handle_out: Vec2::new(0.0, 50.0) };
        let b = Anchor { point: Vec2::new(100.0, 0.0), handle_in: Vec2::new(0.0, 50.0), handle_out: Vec2::ZERO };
        let open = Curve::new(vec![a, b], false, Color::BLACK, 1.0);
        let poly = flatten_curve(&open, 0.25);
        assert!(poly.segments.len() > 4);
        let mut last = 0.0;
        for s in &poly.segments {
            assert_eq!(s.segment, 0);
            assert!((s.t_start - last).abs() < 1e-6);
            assert!(s.t_end > s.t_start);
            last = s.t_end;
        }
        assert!((last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn single_anchor_flattens_to_nothing() {
        let dot = Curve::polygon(&[Vec2::new(1.0, 1.0)], Color::BLACK, 1.0);
        let poly = flatten_curve(&dot, 0.25);
        assert!(poly.segments.is_empty());
        assert!(poly.bounds.is_none());
    }
}
