use serde::{Deserialize, Serialize};

use crate::error::KnotError;
use crate::geometry::limits::{self, TOL_MAX, TOL_MIN, WIDTH_MAX};
use crate::model::Color;

/// Tunables for the drawing surface. Missing JSON fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub marker_radius: f32,
    pub marker_fill: Color,
    /// Pointer slop for anchor and stroke hits (px).
    pub hit_tolerance: f32,
    /// Fit budget for freehand strokes, in squared px.
    pub simplify_tolerance: f32,
    /// Max chord deviation when flattening curves for intersection (px).
    pub flatten_tolerance: f32,
    pub knot_stroke: Color,
    pub knot_width: f32,
    /// Default knot radius as a fraction of the smaller viewport side.
    pub knot_radius_fraction: f32,
    pub sketch_stroke: Color,
    pub sketch_width: f32,
    /// Skip curve pairs whose boxes do not touch.
    pub bbox_prefilter: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            marker_radius: 5.0,
            marker_fill: Color::RED,
            hit_tolerance: 5.0,
            simplify_tolerance: 10.0,
            flatten_tolerance: 0.25,
            knot_stroke: Color::BLUE,
            knot_width: 20.0,
            knot_radius_fraction: 0.25,
            sketch_stroke: Color::BLACK,
            sketch_width: 2.0,
            bbox_prefilter: true,
        }
    }
}

fn check(param: &'static str, v: f32, min: f32, max: f32) -> Result<(), KnotError> {
    if !v.is_finite() {
        return Err(KnotError::NonFinite { param });
    }
    if v < min || v > max {
        return Err(KnotError::OutOfRange { param, min, max, got: v });
    }
    Ok(())
}

impl Options {
    pub fn from_json_str(s: &str) -> Result<Self, KnotError> {
        let opts: Options = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Self, KnotError> {
        let opts: Options = serde_json::from_value(v)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn validate(&self) -> Result<(), KnotError> {
        check("marker_radius", self.marker_radius, 0.0, WIDTH_MAX)?;
        check("hit_tolerance", self.hit_tolerance, 0.0, TOL_MAX)?;
        check("simplify_tolerance", self.simplify_tolerance, TOL_MIN, TOL_MAX)?;
        check("flatten_tolerance", self.flatten_tolerance, TOL_MIN, TOL_MAX)?;
        check("knot_radius_fraction", self.knot_radius_fraction, 0.0, 1.0)?;
        for (param, w) in [("knot_width", self.knot_width), ("sketch_width", self.sketch_width)] {
            if !limits::in_width_bounds(w) {
                check(param, w, f32::MIN_POSITIVE, WIDTH_MAX)?;
            }
        }
        Ok(())
    }
}
