use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

pub use logging::init_logging;

#[wasm_bindgen]
pub struct Sketch {
    pub(crate) inner: knotwork::Controller,
}

impl Sketch {
    pub fn rs_new(width: f32, height: f32) -> Sketch {
        Sketch { inner: knotwork::Controller::new(viewport(width, height), knotwork::Options::default()) }
    }
    pub fn rs_geom_version(&self) -> u64 {
        self.inner.scene().version()
    }
}

// Unusable sizes collapse to an empty viewport.
pub(crate) fn viewport(width: f32, height: f32) -> knotwork::Size {
    let side = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    knotwork::Size { width: side(width), height: side(height) }
}
