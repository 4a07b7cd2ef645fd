//! Field classification and input coercion.
//!
//! A cell's stored value stays a plain [`serde_json::Value`]; everything that
//! needs to interpret one goes through [`classify`] so the rules for telling
//! a leaf cell from a nested table live in exactly one place.

use serde_json::{Map, Value};

/// One row's data: column key to field value, in insertion order.
pub type Record = Map<String, Value>;

/// How a field value renders and mutates.
///
/// Classification is structural only: any sequence is a [`NestedList`]
/// (including the empty one, and including lists holding non-record items),
/// any keyed structure is a [`NestedObject`] edited as a one-row table, and
/// everything else (string, number, bool, null) is a leaf [`Primitive`].
///
/// [`NestedList`]: FieldKind::NestedList
/// [`NestedObject`]: FieldKind::NestedObject
/// [`Primitive`]: FieldKind::Primitive
#[derive(Debug)]
pub enum FieldKind<'a> {
    Primitive(&'a Value),
    NestedList(&'a [Value]),
    NestedObject(&'a Map<String, Value>),
}

/// Mutable counterpart of [`FieldKind`], used by the mutation paths.
#[derive(Debug)]
pub enum FieldKindMut<'a> {
    Primitive(&'a mut Value),
    NestedList(&'a mut Vec<Value>),
    NestedObject(&'a mut Map<String, Value>),
}

/// Classify a field value. Pure, no side effects.
pub fn classify(value: &Value) -> FieldKind<'_> {
    match value {
        Value::Array(items) => FieldKind::NestedList(items),
        Value::Object(map) => FieldKind::NestedObject(map),
        other => FieldKind::Primitive(other),
    }
}

/// Classify a field value for mutation.
pub fn classify_mut(value: &mut Value) -> FieldKindMut<'_> {
    match value {
        Value::Array(items) => FieldKindMut::NestedList(items),
        Value::Object(map) => FieldKindMut::NestedObject(map),
        other => FieldKindMut::Primitive(other),
    }
}

/// Convert user-entered text into a stored primitive.
///
/// The trimmed text must parse entirely as a numeric literal to become a
/// number; otherwise the original untrimmed text is kept. The numeric
/// grammar is Rust's: integers first (so "007" becomes 7), then floats
/// including scientific notation ("1e3" becomes 1000.0). Hex forms ("0x10")
/// and non-finite results ("inf", "NaN") stay text since JSON cannot carry
/// them. Empty input stores as the empty string.
pub fn coerce(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::String(text.to_string());
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(text.to_string())
}

/// Display text for a leaf value. Null and absent cells render empty.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Structured values at a leaf position are display-only.
        other => other.to_string(),
    }
}

/// The blank cell value written by structural operations.
pub(crate) fn empty_cell() -> Value {
    Value::String(String::new())
}
