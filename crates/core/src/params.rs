//! Loose-JSON parameter extraction.
//!
//! Parameter overrides reach the engine as an untyped `serde_json::Value`
//! object. Each helper here pulls one typed field, substituting the caller's
//! default when the key is absent or carries the wrong type; none of them
//! can fail.

use serde_json::Value;

/// `params[name]` as `f64`, or `default`. JSON integers are widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as `usize`, or `default`. Negative and fractional numbers
/// fall back to the default.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as an owned `String`, or `default`.
pub fn param_str(params: &Value, name: &str, default: &str) -> String {
    match params.get(name).and_then(Value::as_str) {
        Some(s) => s.to_owned(),
        None => default.to_owned(),
    }
}
