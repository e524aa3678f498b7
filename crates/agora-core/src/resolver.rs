//! Effective-configuration merge: caller overrides win over per-action
//! defaults unless the override value is falsy.

use serde_json::{Map, Value};

/// An override value is effective when it carries information. Falsy values
/// (`null`, `false`, numeric zero, `""`, `[]`, `{}`) make the default win.
fn is_effective(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Shallow merge of `defaults` with caller `overrides`.
///
/// For every key in `defaults` the override value wins if present and
/// effective, else the default stays. Keys present only in `overrides` pass
/// through unchanged, falsy or not. Nested objects replace the default
/// wholesale; there is no recursive merge.
pub fn merge(defaults: &Map<String, Value>, overrides: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut out = defaults.clone();
    if let Some(ov) = overrides {
        for (key, value) in ov {
            if is_effective(value) || !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

/// Convenience wrapper for `json!`-built maps. Non-object values on either
/// side are treated as empty maps.
pub fn merge_values(defaults: &Value, overrides: Option<&Value>) -> Map<String, Value> {
    let overrides = overrides.and_then(Value::as_object);
    match defaults.as_object() {
        Some(defaults) => merge(defaults, overrides),
        None => merge(&Map::new(), overrides),
    }
}
