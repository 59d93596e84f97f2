//! Missing-value predicate shared by every lookup.
//!
//! Settings lookups treat a handful of "empty" JSON values exactly like an
//! absent key: `null`, `false`, `""`, and any number equal to zero. Empty
//! arrays and empty objects are present values.

use serde_json::Value;

/// Returns `true` when a looked-up value counts as not configured.
///
/// `None` is an absent key.
///
/// # Example
///
/// ```
/// use envsettings::is_missing;
/// use serde_json::json;
///
/// assert!(is_missing(None));
/// assert!(is_missing(Some(&json!(0))));
/// assert!(!is_missing(Some(&json!([]))));
/// ```
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !*b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f == 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Short type label used in diagnostics.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
