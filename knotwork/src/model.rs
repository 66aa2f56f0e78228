use serde::{Deserialize, Serialize};

use crate::geometry::cubic::CubicBezier;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };

    pub fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
    #[inline]
    pub fn dot(self, o: Vec2) -> f32 {
        self.x * o.x + self.y * o.y
    }
    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }
    #[inline]
    pub fn dist_sq(self, o: Vec2) -> f32 {
        let d = self - o;
        d.dot(d)
    }
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x + o.x, y: self.y + o.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x - o.x, y: self.y - o.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, s: f32) -> Vec2 {
        Vec2 { x: self.x * s, y: self.y * s }
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

/// Axis-aligned box, min corner inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_point(p: Vec2) -> Self {
        Rect { min: p, max: p }
    }
    pub fn include(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
    pub fn inflate(self, pad: f32) -> Self {
        Rect {
            min: Vec2::new(self.min.x - pad, self.min.y - pad),
            max: Vec2::new(self.max.x + pad, self.max.y + pad),
        }
    }
    pub fn overlaps(&self, o: &Rect) -> bool {
        self.min.x <= o.max.x && o.min.x <= self.max.x && self.min.y <= o.max.y && o.min.y <= self.max.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// One control point of a curve. Handles are offsets from `point`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub point: Vec2,
    pub handle_in: Vec2,
    pub handle_out: Vec2,
}

impl Anchor {
    pub fn corner(point: Vec2) -> Self {
        Anchor { point, handle_in: Vec2::ZERO, handle_out: Vec2::ZERO }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurveId(pub(crate) u32);

impl CurveId {
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Rebuild an id handed out earlier, e.g. one that crossed the JS bridge.
    pub fn from_raw(raw: u32) -> CurveId {
        CurveId(raw)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub anchors: Vec<Anchor>,
    pub closed: bool,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl Curve {
    pub fn new(anchors: Vec<Anchor>, closed: bool, stroke: Color, stroke_width: f32) -> Self {
        Curve { anchors, closed, stroke, stroke_width }
    }

    /// Closed polygon through `points` with straight edges.
    pub fn polygon(points: &[Vec2], stroke: Color, stroke_width: f32) -> Self {
        let anchors = points.iter().copied().map(Anchor::corner).collect();
        Curve { anchors, closed: true, stroke, stroke_width }
    }

    /// Only closed curves with at least two anchors take part in pairing.
    pub fn is_pairable(&self) -> bool {
        self.closed && self.anchors.len() >= 2
    }

    pub fn segment_count(&self) -> usize {
        match self.anchors.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Control points of segment `i`, which runs from anchor `i` to the next one
    /// (wrapping to anchor 0 on a closed curve).
    pub fn segment(&self, i: usize) -> Option<[Vec2; 4]> {
        if i >= self.segment_count() {
            return None;
        }
        let a = self.anchors[i];
        let b = self.anchors[(i + 1) % self.anchors.len()];
        Some([a.point, a.point + a.handle_out, b.point + b.handle_in, b.point])
    }

    /// Position at `loc`. Straight segments are parameterized linearly,
    /// curved ones by their cubic parameter.
    pub fn point_at(&self, loc: CurveLocation) -> Option<Vec2> {
        let [p0, p1, p2, p3] = self.segment(loc.segment)?;
        let c = CubicBezier::new(p0, p1, p2, p3);
        if c.is_line() {
            Some(p0 + (p3 - p0) * loc.t)
        } else {
            Some(c.eval(loc.t))
        }
    }
}

/// Position on a curve: segment index plus cubic parameter within it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveLocation {
    pub segment: usize,
    pub t: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint {
    pub curves: (CurveId, CurveId),
    pub point: Vec2,
    pub location_a: CurveLocation,
    pub location_b: CurveLocation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub(crate) u32);

impl MarkerId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub center: Vec2,
    pub radius: f32,
    pub fill: Color,
}
