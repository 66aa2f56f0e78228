use js_sys::Object;
use knotwork::KnotError;
use wasm_bindgen::prelude::*;

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data {
        set_kv(&e, "data", &d);
    }
    set_kv(&root, "error", &e.into());
    root.into()
}

fn param_data(param: &str) -> Object {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    d
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    err("non_finite", format!("parameter '{}' must be finite", param), Some(param_data(param).into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let d = param_data(param);
    set_kv(&d, "min", &JsValue::from_f64(min as f64));
    set_kv(&d, "max", &JsValue::from_f64(max as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", "no curve with this id", Some(d.into()))
}

pub fn from_knot_error(e: &KnotError) -> JsValue {
    match e {
        KnotError::NonFinite { param } => non_finite(param),
        KnotError::OutOfRange { param, min, max, got } => out_of_range(param, *min, *max, *got),
        KnotError::InvalidJson(_) => err(e.code(), e.to_string(), None),
    }
}

/// First non-finite entry of `params`, as an error envelope.
pub fn check_finite(params: &[(&str, f32)]) -> Option<JsValue> {
    params.iter().find(|(_, v)| !v.is_finite()).map(|(name, _)| non_finite(name))
}
