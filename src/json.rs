//! Defaulted nested-path lookups over raw API documents.
//!
//! Every accessor in this crate walks deeply nested, inconsistently shaped
//! JSON. Missing keys, out-of-range indices and type mismatches are all
//! normal; they degrade to `None` here instead of surfacing as errors.

use serde_json::Value;

/// Look up a value by JSON pointer. JSON `null` counts as absent.
pub fn nested<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer).filter(|v| !v.is_null())
}

/// Try several pointers in priority order and return the first hit.
///
/// The order encodes preference: callers list the primary record first
/// (e.g. personneMorale) and alternatives after it.
pub fn first_of<'a>(value: &'a Value, pointers: &[&str]) -> Option<&'a Value> {
    pointers.iter().find_map(|p| nested(value, p))
}

/// Nested lookup of a non-empty string.
pub fn nested_str<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    nested(value, pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// First non-empty string among several pointers, in priority order.
pub fn first_str<'a>(value: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers.iter().find_map(|p| nested_str(value, p))
}

/// Nested lookup of an integer.
pub fn nested_i64(value: &Value, pointer: &str) -> Option<i64> {
    nested(value, pointer).and_then(Value::as_i64)
}
