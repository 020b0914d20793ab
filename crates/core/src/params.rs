//! Typed lookups into a JSON params object.
//!
//! Plain values (`param_usize`, `param_string`) fall back to the default when
//! the key is missing or has the wrong JSON type. Tagged values
//! (`param_space`, `param_kind`) also fall back when missing, but a string
//! that names no known tag is an error rather than a silent default.

use serde::Deserialize;
use serde_json::Value;

use crate::color::ColorSpace;
use crate::error::{Result, SplineError};
use crate::path::SplineKind;

/// `params[name]` as a `usize`, or `default` if missing, negative or not an integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// `params[name]` as a `String`, or `default` if missing or not a string.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// `params[name]` parsed as a color space tag.
///
/// Returns `SplineError::UnsupportedSpace` for an unknown tag.
pub fn param_space(params: &Value, name: &str, default: ColorSpace) -> Result<ColorSpace> {
    match params.get(name).and_then(Value::as_str) {
        Some(tag) => tag.parse(),
        None => Ok(default),
    }
}

/// `params[name]` parsed as a spline kind (`linear`, `catmull_rom`,
/// `bezier`, `b_spline`).
///
/// Returns `SplineError::InvalidOperation` for an unknown kind.
pub fn param_kind(params: &Value, name: &str, default: SplineKind) -> Result<SplineKind> {
    match params.get(name) {
        Some(v @ Value::String(tag)) => SplineKind::deserialize(v)
            .map_err(|_| SplineError::InvalidOperation(format!("unknown spline kind: {tag}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_usize_reads_integer() {
        let params = json!({"size": 24});
        assert_eq!(param_usize(&params, "size", 16), 24);
    }

    #[test]
    fn param_usize_falls_back_on_missing_or_mistyped() {
        assert_eq!(param_usize(&json!({}), "size", 16), 16);
        assert_eq!(param_usize(&json!({"size": 2.5}), "size", 16), 16);
        assert_eq!(param_usize(&json!({"size": -3}), "size", 16), 16);
        assert_eq!(param_usize(&json!({"size": "many"}), "size", 16), 16);
        assert_eq!(param_usize(&json!("not an object"), "size", 16), 16);
    }

    #[test]
    fn param_string_reads_string() {
        let params = json!({"name": "sunset"});
        assert_eq!(param_string(&params, "name", "palette"), "sunset");
    }

    #[test]
    fn param_string_falls_back_on_missing_or_mistyped() {
        assert_eq!(param_string(&json!({}), "name", "palette"), "palette");
        assert_eq!(param_string(&json!({"name": 42}), "name", "palette"), "palette");
        assert_eq!(param_string(&json!({"name": ""}), "name", "palette"), "");
    }

    #[test]
    fn param_space_parses_tags_and_aliases() {
        let params = json!({"a": "hsl", "b": "lab", "c": "OKLCH"});
        assert_eq!(param_space(&params, "a", ColorSpace::Srgb).unwrap(), ColorSpace::Hsl);
        assert_eq!(param_space(&params, "b", ColorSpace::Srgb).unwrap(), ColorSpace::OkLab);
        assert_eq!(param_space(&params, "c", ColorSpace::Srgb).unwrap(), ColorSpace::OkLch);
    }

    #[test]
    fn param_space_defaults_when_missing_or_mistyped() {
        assert_eq!(param_space(&json!({}), "a", ColorSpace::OkLch).unwrap(), ColorSpace::OkLch);
        assert_eq!(param_space(&json!({"a": 3}), "a", ColorSpace::Hsv).unwrap(), ColorSpace::Hsv);
    }

    #[test]
    fn param_space_rejects_unknown_tag() {
        let err = param_space(&json!({"a": "cmyk"}), "a", ColorSpace::Srgb).unwrap_err();
        assert_eq!(err, SplineError::UnsupportedSpace("cmyk".into()));
    }

    #[test]
    fn param_kind_parses_snake_case() {
        let params = json!({"kind": "b_spline"});
        assert_eq!(
            param_kind(&params, "kind", SplineKind::Linear).unwrap(),
            SplineKind::BSpline
        );
        assert_eq!(
            param_kind(&json!({}), "kind", SplineKind::Bezier).unwrap(),
            SplineKind::Bezier
        );
    }

    #[test]
    fn param_kind_rejects_unknown_kind() {
        let err = param_kind(&json!({"kind": "nurbs"}), "kind", SplineKind::Linear).unwrap_err();
        assert!(matches!(err, SplineError::InvalidOperation(msg) if msg.contains("nurbs")));
    }
}
