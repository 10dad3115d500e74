//! Record field flattening
//!
//! Turns an arbitrarily nested event record into a flat mapping of dotted,
//! capitalized field paths to string values, ready for command synthesis.
//! Flattening is total: every JSON value stringifies, so this module has no
//! failure path.

use serde_json::Value;
use std::collections::BTreeMap;

/// Flattened record fields: dotted capitalized path -> stringified value.
///
/// Ordered so device families emit key/value arguments deterministically.
pub type FlattenedFields = BTreeMap<String, String>;

/// Flatten `value` under the field name `field` into `fields`.
///
/// The first character of `field` is capitalized (the casing downstream
/// command consumers expect). Nested objects extend the path with
/// `.CapitalizedSubKey`; list leaves join their elements with `", "`; other
/// leaves stringify. `key_prefix` lands only on terminal writes at the
/// depth it was supplied; nested leaves are keyed by their dotted path
/// alone.
pub fn flatten_field(field: &str, value: &Value, key_prefix: &str, fields: &mut FlattenedFields) {
    let field = capitalize_first(field);
    match value {
        Value::Object(children) => {
            for (subkey, child) in children {
                let child_field = format!("{}.{}", field, capitalize_first(subkey));
                // The prefix is not forwarded: it belongs to the entry
                // depth only.
                flatten_field(&child_field, child, "", fields);
            }
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(value_to_string)
                .collect::<Vec<_>>()
                .join(", ");
            fields.insert(format!("{key_prefix}{field}"), joined);
        }
        leaf => {
            fields.insert(format!("{key_prefix}{field}"), value_to_string(leaf));
        }
    }
}

/// Convert a JSON value to the string form used in generated commands
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        // Containers nested inside arrays keep their compact JSON form.
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Capitalize the first character, leaving the rest untouched
fn capitalize_first(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
