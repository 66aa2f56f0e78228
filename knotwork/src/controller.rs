//! Editing state machine: turns pointer, key and resize events into scene
//! edits and recomputes.
//!
//! ```text
//!   Idle ──mode key──▶ Drawing ──mode key──▶ Idle
//!    │  ▲
//!    │  └──────── pointer-up ────────┐
//!    └─pointer-down on anchor/stroke─▶ DraggingAnchor
//! ```
//!
//! The clear key empties the scene and returns to `Idle` from any state.

use log::{info, trace};
use serde::Serialize;

use crate::engine::IntersectionEngine;
use crate::geometry::fit::fit_points;
use crate::geometry::limits::{in_coord_bounds, MAX_STROKE_POINTS};
use crate::markers::MarkerLayer;
use crate::model::{Anchor, Curve, CurveId, IntersectionPoint, Marker, Size, Vec2};
use crate::options::Options;
use crate::provider::{CurveGeometry, FlattenGeometry, Hit};
use crate::scene::SceneStore;
use crate::shapes::{default_knot, knot_frame};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state")]
pub enum EditState {
    Idle,
    /// Draw mode; `stroke` is the curve under the pointer while it is down.
    Drawing { stroke: Option<CurveId> },
    DraggingAnchor { curve: CurveId, anchor: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ToggleDraw,
    Clear,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Key {
        match name {
            "d" => Key::ToggleDraw,
            "c" => Key::Clear,
            _ => Key::Other,
        }
    }
}

pub struct Controller<G: CurveGeometry = FlattenGeometry> {
    scene: SceneStore,
    engine: IntersectionEngine<G>,
    options: Options,
    state: EditState,
    last_point: Option<Vec2>,
    viewport: Size,
}

impl Controller<FlattenGeometry> {
    /// A surface holding the starter knot.
    pub fn new(viewport: Size, options: Options) -> Self {
        let geometry = FlattenGeometry::new(options.flatten_tolerance);
        let mut c = Controller::with_geometry(geometry, viewport, options);
        c.add_default_knot();
        c
    }

    /// Replace the options; marker style and flattening apply from the next recompute.
    pub fn set_options(&mut self, options: Options) {
        self.engine.geometry_mut().set_tolerance(options.flatten_tolerance);
        self.apply_options(options);
    }
}

impl<G: CurveGeometry> Controller<G> {
    /// An empty surface using `geometry` for intersections and hit tests.
    pub fn with_geometry(geometry: G, viewport: Size, options: Options) -> Self {
        let layer = MarkerLayer::new(options.marker_radius, options.marker_fill);
        let mut engine = IntersectionEngine::new(geometry, layer);
        engine.set_prefilter(options.bbox_prefilter);
        Controller { scene: SceneStore::new(), engine, options, state: EditState::Idle, last_point: None, viewport }
    }

    fn apply_options(&mut self, options: Options) {
        self.engine.layer_mut().set_style(options.marker_radius, options.marker_fill);
        self.engine.set_prefilter(options.bbox_prefilter);
        self.options = options;
    }

    pub fn add_default_knot(&mut self) -> CurveId {
        let (center, radius) = knot_frame(self.viewport, self.options.knot_radius_fraction);
        let knot = default_knot(center, radius, self.options.knot_stroke, self.options.knot_width);
        let id = self.scene.add_curve(knot);
        self.recompute();
        id
    }

    /// Remove a curve and refresh the markers. Unknown ids are a no-op.
    pub fn remove_curve(&mut self, id: CurveId) -> bool {
        if !self.scene.remove_curve(id) {
            return false;
        }
        self.state = match self.state {
            EditState::DraggingAnchor { curve, .. } if curve == id => EditState::Idle,
            EditState::Drawing { stroke: Some(s) } if s == id => EditState::Drawing { stroke: None },
            s => s,
        };
        self.recompute();
        true
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    /// Direct scene access for hosts; call [`Controller::recompute`] afterwards.
    pub fn scene_mut(&mut self) -> &mut SceneStore {
        &mut self.scene
    }

    pub fn engine(&self) -> &IntersectionEngine<G> {
        &self.engine
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, EditState::Drawing { .. })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn curves(&self) -> impl Iterator<Item = (CurveId, &Curve)> + '_ {
        self.scene.curves()
    }

    pub fn markers(&self) -> &[Marker] {
        self.engine.markers()
    }

    pub fn intersections(&self) -> &[IntersectionPoint] {
        self.engine.intersections()
    }

    pub fn recompute(&mut self) -> usize {
        self.engine.recompute(&self.scene)
    }

    pub fn pointer_down(&mut self, p: Vec2) {
        if !accept(p) {
            trace!("pointer_down: ignoring {:?}", p);
            return;
        }
        self.last_point = Some(p);
        match self.state {
            EditState::Drawing { .. } => {
                let (stroke, width) = (self.options.sketch_stroke, self.options.sketch_width);
                let id = self.scene.add_curve(Curve::new(vec![Anchor::corner(p)], false, stroke, width));
                self.state = EditState::Drawing { stroke: Some(id) };
            }
            EditState::Idle | EditState::DraggingAnchor { .. } => {
                let hit = self.engine.geometry().hit_test(&self.scene, p, self.options.hit_tolerance);
                self.state = match hit {
                    Some(Hit::Anchor { curve, index, .. }) => EditState::DraggingAnchor { curve, anchor: index },
                    Some(Hit::Stroke { curve, location, .. }) => {
                        // A hit on the closing segment appends after the last anchor.
                        match self.scene.insert_anchor(curve, location.segment, p) {
                            Some(anchor) => {
                                self.recompute();
                                EditState::DraggingAnchor { curve, anchor }
                            }
                            None => EditState::Idle,
                        }
                    }
                    None => EditState::Idle,
                };
            }
        }
    }

    pub fn pointer_drag(&mut self, p: Vec2) {
        if !accept(p) {
            trace!("pointer_drag: ignoring {:?}", p);
            return;
        }
        match self.state {
            EditState::Drawing { stroke: Some(id) } => {
                if self.scene.get(id).map_or(false, |c| c.anchors.len() < MAX_STROKE_POINTS) {
                    self.scene.append_anchor(id, p);
                }
                self.last_point = Some(p);
            }
            EditState::DraggingAnchor { curve, anchor } => {
                let delta = p - self.last_point.unwrap_or(p);
                if let Some(a) = self.scene.anchor(curve, anchor) {
                    self.scene.update_anchor(curve, anchor, a.point + delta);
                }
                self.last_point = Some(p);
                self.recompute();
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, _p: Vec2) {
        match self.state {
            EditState::Drawing { stroke: Some(id) } => {
                self.finish_stroke(id);
                self.state = EditState::Drawing { stroke: None };
            }
            EditState::DraggingAnchor { .. } => self.state = EditState::Idle,
            _ => {}
        }
        self.last_point = None;
        self.recompute();
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::ToggleDraw => {
                if let EditState::Drawing { stroke } = self.state {
                    if let Some(id) = stroke {
                        self.finish_stroke(id);
                        self.recompute();
                    }
                    self.state = EditState::Idle;
                    info!("Edit mode");
                } else {
                    self.state = EditState::Drawing { stroke: None };
                    info!("Drawing mode");
                }
                self.last_point = None;
            }
            Key::Clear => {
                self.scene.clear();
                self.engine.clear(&self.scene);
                self.state = EditState::Idle;
                self.last_point = None;
                info!("Canvas cleared");
            }
            Key::Other => trace!("key_down: unbound key"),
        }
    }

    /// New viewport size. Geometry is untouched; markers are recomputed.
    pub fn resize(&mut self, size: Size) {
        if !(size.width.is_finite() && size.height.is_finite()) || size.width < 0.0 || size.height < 0.0 {
            trace!("resize: ignoring {:?}", size);
            return;
        }
        self.viewport = size;
        self.recompute();
    }

    fn finish_stroke(&mut self, id: CurveId) {
        let points: Vec<Vec2> = match self.scene.get(id) {
            Some(c) => c.anchors.iter().map(|a| a.point).collect(),
            None => return,
        };
        let anchors = fit_points(&points, self.options.simplify_tolerance);
        trace!("finish_stroke: {:?} {} samples -> {} anchors", id, points.len(), anchors.len());
        self.scene.set_anchors(id, anchors);
        self.scene.set_closed(id, true);
    }
}

#[inline]
fn accept(p: Vec2) -> bool {
    in_coord_bounds(p.x) && in_coord_bounds(p.y)
}
