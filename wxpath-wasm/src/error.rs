use crate::interop::{new_obj, set_kv};
use wasm_bindgen::prelude::*;
use wxpath::error::PersistError;

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
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

/// First non-finite entry of `params`, as an error.
pub fn check_finite(params: &[(&str, f32)]) -> Option<JsValue> {
    params.iter().find(|(_, v)| !v.is_finite()).map(|(name, _)| non_finite(name))
}

#[inline]
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min as f64));
    set_kv(&d, "max", &JsValue::from_f64(max as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

/// An enum-like string parameter that names nothing known.
#[inline]
pub fn invalid_value(param: &str, got: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "got", &JsValue::from_str(got));
    let code = if param == "tool" { "invalid_tool" } else { "invalid_value" };
    err(code, format!("unknown {} '{}'", param, got), Some(d.into()))
}

/// The shape exists but is in the wrong lifecycle state for the call.
#[inline]
pub fn invalid_state(id: u32, expected: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    set_kv(&d, "expected", &JsValue::from_str(expected));
    err("invalid_state", format!("shape {} is not {}", id, expected), Some(d.into()))
}

pub fn persist(e: &PersistError) -> JsValue {
    err(e.code(), e.to_string(), None)
}
