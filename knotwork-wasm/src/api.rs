use crate::Sketch;
use knotwork::model::{CurveId, Vec2};
use knotwork::provider::CurveGeometry;
use knotwork::{Key, Options};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{arr_f32, arr_u32, arr_u8, new_obj, set_kv, to_js};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
impl Sketch {
    /// A surface of the given size holding the starter knot.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Sketch {
        crate::Sketch::rs_new(width, height)
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Pointer + keys
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.inner.pointer_down(Vec2::new(x, y));
    }
    pub fn pointer_down_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) {
            return e;
        }
        self.pointer_down(x, y);
        error::ok(self.state())
    }
    pub fn pointer_drag(&mut self, x: f32, y: f32) {
        self.inner.pointer_drag(Vec2::new(x, y));
    }
    pub fn pointer_drag_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) {
            return e;
        }
        self.pointer_drag(x, y);
        error::ok(self.state())
    }
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.inner.pointer_up(Vec2::new(x, y));
    }
    pub fn pointer_up_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) {
            return e;
        }
        self.pointer_up(x, y);
        error::ok(self.state())
    }
    /// `"d"` toggles draw mode, `"c"` clears; other keys are ignored.
    pub fn key_down(&mut self, key: &str) {
        self.inner.key_down(Key::from_name(key));
    }
    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(knotwork::Size { width, height });
    }
    pub fn resize_res(&mut self, width: f32, height: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("width", width), ("height", height)]) {
            return e;
        }
        for (name, v) in [("width", width), ("height", height)] {
            if v < 0.0 {
                return error::out_of_range(name, 0.0, f32::INFINITY, v);
            }
        }
        self.resize(width, height);
        error::ok(JsValue::from_f64(self.marker_count() as f64))
    }

    // State
    /// `{ state: "Idle" | "Drawing" | "DraggingAnchor", ... }`
    pub fn state(&self) -> JsValue {
        to_js(&self.inner.state())
    }
    pub fn is_drawing(&self) -> bool {
        self.inner.is_drawing()
    }

    // Scene
    pub fn recompute(&mut self) -> u32 {
        self.inner.recompute() as u32
    }
    pub fn is_stale(&self) -> bool {
        self.inner.engine().is_stale(self.inner.scene())
    }
    pub fn clear(&mut self) {
        self.inner.key_down(Key::Clear);
    }
    pub fn add_default_knot(&mut self) -> u32 {
        self.inner.add_default_knot().raw()
    }
    /// Removes the curve and recomputes the markers.
    pub fn remove_curve(&mut self, id: u32) -> bool {
        self.inner.remove_curve(CurveId::from_raw(id))
    }
    pub fn remove_curve_res(&mut self, id: u32) -> JsValue {
        if !self.inner.scene().contains(CurveId::from_raw(id)) {
            return error::invalid_id(id);
        }
        error::ok(JsValue::from_bool(self.remove_curve(id)))
    }
    pub fn curve_count(&self) -> u32 {
        self.inner.scene().len() as u32
    }
    pub fn marker_count(&self) -> u32 {
        self.inner.markers().len() as u32
    }

    // Typed arrays getters
    pub fn get_curve_data(&self) -> JsValue {
        let ca = self.inner.scene().get_curve_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ca.ids).into());
        set_kv(&obj, "anchor_counts", &arr_u32(&ca.anchor_counts).into());
        set_kv(&obj, "positions", &arr_f32(&ca.positions).into());
        set_kv(&obj, "handles", &arr_f32(&ca.handles).into());
        set_kv(&obj, "closed", &arr_u8(&ca.closed).into());
        set_kv(&obj, "stroke_rgba", &arr_u8(&ca.stroke_rgba).into());
        set_kv(&obj, "stroke_widths", &arr_f32(&ca.stroke_widths).into());
        obj.into()
    }
    pub fn get_marker_data(&self) -> JsValue {
        let ma = self.inner.engine().layer().get_marker_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ma.ids).into());
        set_kv(&obj, "centers", &arr_f32(&ma.centers).into());
        set_kv(&obj, "radii", &arr_f32(&ma.radii).into());
        set_kv(&obj, "fill_rgba", &arr_u8(&ma.fill_rgba).into());
        obj.into()
    }
    /// Every crossing from the last recompute, with curve ids and locations.
    pub fn get_intersections(&self) -> JsValue {
        to_js(self.inner.intersections())
    }

    // Picking
    pub fn hit_test(&self, x: f32, y: f32) -> JsValue {
        let tol = self.inner.options().hit_tolerance;
        match self.inner.engine().geometry().hit_test(self.inner.scene(), Vec2::new(x, y), tol) {
            Some(hit) => to_js(&hit),
            None => JsValue::NULL,
        }
    }
    pub fn hit_test_res(&self, x: f32, y: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) {
            return e;
        }
        error::ok(self.hit_test(x, y))
    }

    // Options
    pub fn get_options(&self) -> JsValue {
        to_js(self.inner.options())
    }
    pub fn set_options_res(&mut self, v: JsValue) -> JsValue {
        let value = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => val,
            Err(e) => return error::err("invalid_json", format!("{}", e), None),
        };
        match Options::from_json_value(value) {
            Ok(opts) => {
                self.inner.set_options(opts);
                error::ok(JsValue::from_f64(self.inner.recompute() as f64))
            }
            Err(e) => error::from_knot_error(&e),
        }
    }
}
