//! Canonical JSON encoding.
//!
//! Rules:
//! - object keys sorted by code point at every nesting level
//! - separators `,` and `:` with no surrounding whitespace
//! - strings emitted as UTF-8; only `"`, `\` and control characters escaped
//! - integers in decimal, floats in shortest round-trip form

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalError;

/// Convert any serializable value into a JSON tree.
///
/// This is the only fallible step of canonical encoding.
pub fn to_canonical_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, CanonicalError> {
    Ok(serde_json::to_value(value)?)
}

/// Canonical JSON text for any serializable value.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CanonicalError> {
    let tree = to_canonical_value(value)?;
    Ok(encode_value(&tree))
}

/// Canonical JSON text for a JSON tree. Never fails.
pub fn encode_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|left, right| left.0.cmp(right.0));

            out.push('{');
            for (idx, (key, item)) in entries.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(item, out);
            }
            out.push('}');
        }
        Value::String(s) => write_string(s, out),
        // null, booleans and numbers: compact Display is already canonical
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push_str(&Value::from(s).to_string());
}
