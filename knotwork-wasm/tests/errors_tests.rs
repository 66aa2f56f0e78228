use js_sys::Reflect;
use knotwork_wasm::Sketch;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn err_param(v: &JsValue) -> Option<String> {
    let e = Reflect::get(v, &JsValue::from_str("error")).ok()?;
    let d = Reflect::get(&e, &JsValue::from_str("data")).ok()?;
    Reflect::get(&d, &JsValue::from_str("param")).ok()?.as_string()
}

#[wasm_bindgen_test]
fn non_finite_pointer_input_is_rejected_without_mutation() {
    let mut s = Sketch::new(800.0, 600.0);
    let ver = s.geom_version();
    let r = s.pointer_down_res(f32::NAN, 300.0);
    assert!(is_err(&r, "non_finite"));
    assert_eq!(err_param(&r).as_deref(), Some("x"));
    let r = s.pointer_drag_res(10.0, f32::INFINITY);
    assert_eq!(err_param(&r).as_deref(), Some("y"));
    assert!(is_err(&s.pointer_up_res(f32::NEG_INFINITY, 0.0), "non_finite"));
    assert!(is_err(&s.hit_test_res(f32::NAN, 0.0), "non_finite"));
    assert_eq!(s.geom_version(), ver, "state mutated on error");
}

#[wasm_bindgen_test]
fn resize_and_ids_return_typed_errors() {
    let mut s = Sketch::new(800.0, 600.0);
    assert!(is_err(&s.resize_res(-1.0, 10.0), "out_of_range"));
    assert!(is_err(&s.resize_res(f32::NAN, 10.0), "non_finite"));
    assert!(is_err(&s.remove_curve_res(4242), "invalid_id"));
    assert_eq!(s.curve_count(), 1);
}

#[wasm_bindgen_test]
fn bad_options_are_reported() {
    let mut s = Sketch::new(800.0, 600.0);
    let opts = js_sys::Object::new();
    Reflect::set(&opts, &JsValue::from_str("hit_tolerance"), &JsValue::from_f64(-3.0)).unwrap();
    let r = s.set_options_res(opts.into());
    assert!(is_err(&r, "out_of_range"));
    assert_eq!(err_param(&r).as_deref(), Some("hit_tolerance"));

    let bad = js_sys::Object::new();
    Reflect::set(&bad, &JsValue::from_str("marker_radius"), &JsValue::from_str("big")).unwrap();
    assert!(is_err(&s.set_options_res(bad.into()), "invalid_json"));
    assert!(is_err(&s.set_options_res(JsValue::from_f64(3.0)), "invalid_json"));
}
