// ============================================================================
// lumen-store - Change Comparator
// Decides whether an update is semantically different from the stored value
// ============================================================================
//
// Policy chain, first matching rule wins:
//   1. Two objects      -> shallow key-by-key comparison
//   2. Type mismatch    -> changed
//   3. Everything else  -> serialization equality
//
// The comparator runs exactly once per update, before any mutation or
// notification.
// ============================================================================

use serde_json::{Map, Value};

// =============================================================================
// COMPARISON
// =============================================================================

/// Whether `new` is semantically different from `old`.
///
/// # Example
/// ```
/// use lumen_store::has_changed;
/// use serde_json::json;
///
/// assert!(!has_changed(&json!(1), &json!(1)));
/// assert!(has_changed(&json!(1), &json!(2)));
/// assert!(has_changed(&json!(1), &json!("1")));
/// assert!(!has_changed(&json!({"a": 1}), &json!({"a": 1})));
/// ```
pub fn has_changed(old: &Value, new: &Value) -> bool {
    if let (Value::Object(prev), Value::Object(next)) = (old, new) {
        return objects_differ(prev, next);
    }

    if kind(old) != kind(new) {
        return true;
    }

    // Serialization equality fallback. Value's Display renders a canonical
    // JSON string, so distinct representations of the same content compare
    // equal while 1 and 1.0 stay distinct.
    old.to_string() != new.to_string()
}

/// Shallow object comparison.
///
/// A differing key count, a key present on one side only, or a nested object
/// on either side all count as changed; nested contents are never walked.
/// Remaining values compare by serialization equality.
fn objects_differ(prev: &Map<String, Value>, next: &Map<String, Value>) -> bool {
    if prev.len() != next.len() {
        return true;
    }

    for (key, next_value) in next {
        let Some(prev_value) = prev.get(key) else {
            return true;
        };
        if prev_value.is_object() || next_value.is_object() {
            return true;
        }
        if prev_value.to_string() != next_value.to_string() {
            return true;
        }
    }

    false
}

/// The JSON type of a value, for the type-mismatch rule.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// TESTS
// =============================================================================
