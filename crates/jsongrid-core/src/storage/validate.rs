//! Structural limits enforced before a document is persisted.

use crate::error::{JsonGridError, Result};
use serde_json::Value;

/// Records nest at most one level below the top-level document: a record's
/// complex value is level 1, anything inside it deeper than that is rejected.
/// Arrays do not add a level of their own.
pub const MAX_NESTING_DEPTH: usize = 1;

pub const DEFAULT_MAX_KEYS: usize = 10;

/// Per-store structural limits.
#[derive(Debug, Clone)]
pub struct Limits {
    pub max_keys_per_record: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_keys_per_record: DEFAULT_MAX_KEYS,
        }
    }
}

/// Check a document against the structural limits.
pub fn check_document(doc: &Value, limits: &Limits) -> Result<()> {
    check_level(doc, 0, limits)
}

fn check_level(value: &Value, level: usize, limits: &Limits) -> Result<()> {
    if level > MAX_NESTING_DEPTH {
        return Err(JsonGridError::Validation(format!(
            "nesting exceeds {MAX_NESTING_DEPTH} level(s)"
        )));
    }
    match value {
        Value::Object(map) => {
            if map.len() > limits.max_keys_per_record {
                return Err(JsonGridError::Validation(format!(
                    "record has {} keys, limit is {}",
                    map.len(),
                    limits.max_keys_per_record
                )));
            }
            for child in map.values() {
                if is_complex(child) {
                    check_level(child, level + 1, limits)?;
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_complex(item) {
                    check_level(item, level, limits)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn is_complex(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_nesting_level_is_allowed() {
        let doc = json!([
            {"id": 1, "kpis": [{"metric": "Revenue", "value": 100}]},
            {"id": 2, "meta": {"owner": "Bob"}}
        ]);
        assert!(check_document(&doc, &Limits::default()).is_ok());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let doc = json!([{"a": [{"b": {"c": 1}}]}]);
        assert!(matches!(
            check_document(&doc, &Limits::default()),
            Err(JsonGridError::Validation(_))
        ));
    }

    #[test]
    fn test_arrays_do_not_add_a_level() {
        // Scalars inside a nested list sit at the list's level.
        let doc = json!([{"a": [1, 2, 3]}]);
        assert!(check_document(&doc, &Limits::default()).is_ok());
    }

    #[test]
    fn test_key_limit_applies_at_every_level() {
        let limits = Limits {
            max_keys_per_record: 2,
        };
        assert!(check_document(&json!([{"a": 1, "b": 2}]), &limits).is_ok());
        assert!(check_document(&json!([{"a": 1, "b": 2, "c": 3}]), &limits).is_err());
        assert!(check_document(&json!([{"a": [{"x": 1, "y": 2, "z": 3}]}]), &limits).is_err());
    }
}
