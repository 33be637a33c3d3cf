//! Pure helpers for extracting typed scene parameters from a
//! `serde_json::Value` object.
//!
//! Missing keys or wrong types fall back to the given default, except
//! [`param_rgba`] which reports malformed color arrays as an error so a
//! half-written color does not silently render black.

use serde_json::Value;

use crate::error::DemoError;

/// Extracts an `f32` from `params[name]`, returning `default` if missing
/// or not a number.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing
/// or not a boolean.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if
/// missing or not a string.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts an RGBA color array from `params[name]`.
///
/// Absent keys return `default`. A present value must be an array of
/// exactly four numbers.
///
/// # Errors
///
/// Returns `DemoError::InvalidParam` if the value is present but is not
/// a four-number array.
pub fn param_rgba(params: &Value, name: &str, default: [f32; 4]) -> Result<[f32; 4], DemoError> {
    let Some(value) = params.get(name) else {
        return Ok(default);
    };
    let invalid = |detail: &str| DemoError::InvalidParam {
        name: name.to_owned(),
        detail: detail.to_owned(),
    };

    let items = value.as_array().ok_or_else(|| invalid("expected an array"))?;
    if items.len() != 4 {
        return Err(invalid("expected 4 components"));
    }
    let mut rgba = [0.0f32; 4];
    for (slot, item) in rgba.iter_mut().zip(items) {
        *slot = item.as_f64().ok_or_else(|| invalid("expected a number"))? as f32;
    }
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f32_extracts_existing_number() {
        let params = json!({"fov": 60.0});
        assert!((param_f32(&params, "fov", 45.0) - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn param_f32_extracts_integer_as_float() {
        let params = json!({"fov": 60});
        assert!((param_f32(&params, "fov", 45.0) - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn param_f32_returns_default_when_missing_or_wrong_type() {
        let params = json!({"fov": "wide"});
        assert!((param_f32(&params, "fov", 45.0) - 45.0).abs() < f32::EPSILON);
        assert!((param_f32(&params, "other", 1.5) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn param_bool_extracts_and_defaults() {
        let params = json!({"orbit": true});
        assert!(param_bool(&params, "orbit", false));
        assert!(!param_bool(&params, "pulse", false));
    }

    #[test]
    fn param_string_extracts_and_defaults() {
        let params = json!({"texture": "crate.png"});
        assert_eq!(param_string(&params, "texture", ""), "crate.png");
        assert_eq!(param_string(&params, "missing", "fallback"), "fallback");
    }

    #[test]
    fn param_rgba_returns_default_when_absent() {
        let params = json!({});
        let rgba = param_rgba(&params, "clear_color", [0.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(rgba, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn param_rgba_extracts_four_numbers() {
        let params = json!({"clear_color": [0.1, 0.2, 0.3, 1.0]});
        let rgba = param_rgba(&params, "clear_color", [0.0; 4]).unwrap();
        assert!((rgba[0] - 0.1).abs() < 1e-6);
        assert!((rgba[2] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn param_rgba_rejects_wrong_length() {
        let params = json!({"clear_color": [0.1, 0.2]});
        let result = param_rgba(&params, "clear_color", [0.0; 4]);
        assert!(matches!(result, Err(DemoError::InvalidParam { .. })));
    }

    #[test]
    fn param_rgba_rejects_non_array() {
        let params = json!({"clear_color": "red"});
        let result = param_rgba(&params, "clear_color", [0.0; 4]);
        assert!(matches!(result, Err(DemoError::InvalidParam { .. })));
    }

    #[test]
    fn param_rgba_rejects_non_numeric_component() {
        let params = json!({"clear_color": [0.1, 0.2, "x", 1.0]});
        let result = param_rgba(&params, "clear_color", [0.0; 4]);
        assert!(matches!(result, Err(DemoError::InvalidParam { .. })));
    }
}
