//! Document tree helpers
//!
//! The tree is a `serde_json::Value` whose mappings keep insertion order.
//! These helpers coerce nodes to the shape a step expects and report a
//! classified error instead of panicking on a mismatch.

use crate::error::{ConversionError, ConversionResult};
use serde_json::{Map, Value};

/// String-keyed, insertion-ordered mapping node
pub type Mapping = Map<String, Value>;

/// Unwrap a decoded document into its top-level mapping
///
/// # Errors
/// `InvalidDocument` if the top level is a sequence or scalar.
pub fn into_document(value: Value) -> ConversionResult<Mapping> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConversionError::InvalidDocument),
    }
}

/// String form of a node
///
/// Strings are returned as-is. Every other node uses its JSON text, so
/// `1.0` stays `1.0` and `true` becomes `true`.
#[must_use]
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Required property of any shape
///
/// # Errors
/// `InvalidProperty(key)` if absent.
pub fn require<'a>(map: &'a Mapping, key: &str) -> ConversionResult<&'a Value> {
    map.get(key)
        .ok_or_else(|| ConversionError::invalid_property(key))
}

/// Required property that must be a mapping
///
/// # Errors
/// `InvalidProperty(key)` if absent or not a mapping.
pub fn require_mapping<'a>(map: &'a Mapping, key: &str) -> ConversionResult<&'a Mapping> {
    require(map, key)?
        .as_object()
        .ok_or_else(|| ConversionError::invalid_property(key))
}

/// Mutable variant of [`require_mapping`]
///
/// # Errors
/// `InvalidProperty(key)` if absent or not a mapping.
pub fn require_mapping_mut<'a>(
    map: &'a mut Mapping,
    key: &str,
) -> ConversionResult<&'a mut Mapping> {
    map.get_mut(key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ConversionError::invalid_property(key))
}

/// Optional property that is only of interest when it is a mapping
pub fn mapping_mut<'a>(map: &'a mut Mapping, key: &str) -> Option<&'a mut Mapping> {
    map.get_mut(key).and_then(Value::as_object_mut)
}

/// Remove `key` and return its value, keeping the order of the other keys
pub fn take_key(map: &mut Mapping, key: &str) -> Option<Value> {
    map.shift_remove(key)
}

/// Rename `from` to `to` in place
///
/// The renamed entry keeps the position of `from`; an existing `to` entry is
/// replaced. Returns false if `from` was absent.
pub fn rename_key(map: &mut Mapping, from: &str, to: &str) -> bool {
    if !map.contains_key(from) {
        return false;
    }
    for (k, v) in std::mem::take(map) {
        if k == from {
            map.insert(to.to_string(), v);
        } else if k != to {
            map.insert(k, v);
        }
    }
    true
}
