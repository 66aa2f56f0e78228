pub mod model;
pub mod geometry {
    pub mod cubic;
    pub mod fit;
    pub mod flatten;
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod smooth;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod crossings;
    pub mod picking;
}
pub mod controller;
pub mod engine;
pub mod error;
pub mod markers;
pub mod options;
pub mod provider;
pub mod scene;
pub mod shapes;

pub use controller::{Controller, EditState, Key};
pub use engine::{IntersectionEngine, RecomputeStats};
pub use error::KnotError;
pub use markers::MarkerLayer;
pub use model::{
    Anchor, Color, Curve, CurveId, CurveLocation, IntersectionPoint, Marker, MarkerId, Rect, Size, Vec2,
};
pub use options::Options;
pub use provider::{Crossing, CurveGeometry, FlattenGeometry, Hit};
pub use scene::SceneStore;

/// Flat arrays describing every curve, for hosts that upload to the GPU or
/// hand typed arrays to JavaScript.
pub struct CurveArrays {
    pub ids: Vec<u32>,
    /// Anchor count per curve; anchors of curve `k` follow those of curve `k - 1`.
    pub anchor_counts: Vec<u32>,
    /// x, y per anchor.
    pub positions: Vec<f32>,
    /// in.x, in.y, out.x, out.y per anchor, relative to the anchor.
    pub handles: Vec<f32>,
    pub closed: Vec<u8>,
    pub stroke_rgba: Vec<u8>,
    pub stroke_widths: Vec<f32>,
}

/// Flat arrays describing the marker layer.
pub struct MarkerArrays {
    pub ids: Vec<u32>,
    pub centers: Vec<f32>,
    pub radii: Vec<f32>,
    pub fill_rgba: Vec<u8>,
}

impl SceneStore {
    pub fn get_curve_arrays(&self) -> CurveArrays {
        let mut out = CurveArrays {
            ids: Vec::with_capacity(self.len()),
            anchor_counts: Vec::with_capacity(self.len()),
            positions: Vec::new(),
            handles: Vec::new(),
            closed: Vec::with_capacity(self.len()),
            stroke_rgba: Vec::with_capacity(self.len() * 4),
            stroke_widths: Vec::with_capacity(self.len()),
        };
        for (id, c) in self.curves() {
            out.ids.push(id.raw());
            out.anchor_counts.push(c.anchors.len() as u32);
            for a in &c.anchors {
                out.positions.extend_from_slice(&[a.point.x, a.point.y]);
                out.handles.extend_from_slice(&[a.handle_in.x, a.handle_in.y, a.handle_out.x, a.handle_out.y]);
            }
            out.closed.push(c.closed as u8);
            out.stroke_rgba.extend_from_slice(&c.stroke.rgba());
            out.stroke_widths.push(c.stroke_width);
        }
        out
    }
}

impl MarkerLayer {
    pub fn get_marker_arrays(&self) -> MarkerArrays {
        let mut out = MarkerArrays { ids: Vec::new(), centers: Vec::new(), radii: Vec::new(), fill_rgba: Vec::new() };
        for m in self.markers() {
            out.ids.push(m.id.raw());
            out.centers.extend_from_slice(&[m.center.x, m.center.y]);
            out.radii.push(m.radius);
            out.fill_rgba.extend_from_slice(&m.fill.rgba());
        }
        out
    }
}
