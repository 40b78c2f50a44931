//! JSON shape sketching for `inspect`.
//!
//! Produces a compact type sketch of an arbitrary JSON document so the
//! dump format can be eyeballed without opening a multi-hundred-MB file.
//! Arrays are sketched from their first element only; an object shape
//! (identified by its sorted key set) is expanded once and printed as
//! `{...}` on every later encounter.

use std::collections::HashSet;
use std::path::Path;

use crate::model::DumpError;

/// Maximum number of keys listed per object before the overflow line.
const MAX_KEYS: usize = 20;

/// Sketch a parsed JSON value.
pub fn sketch_value(value: &serde_json::Value) -> String {
    let mut seen = HashSet::new();
    sketch(value, &mut seen, 0)
}

/// Read a file and sketch its contents.
pub fn sketch_file(path: &Path) -> Result<String, DumpError> {
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    Ok(sketch_value(&value))
}

fn sketch(value: &serde_json::Value, seen: &mut HashSet<String>, depth: usize) -> String {
    use serde_json::Value;

    let indent = "  ".repeat(depth);

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(n) => {
            if n.is_f64() {
                "float".to_string()
            } else {
                "int".to_string()
            }
        }
        Value::String(_) => "string".to_string(),
        Value::Array(items) => match items.first() {
            None => "[]".to_string(),
            Some(first) => format!("Array<{}>", sketch(first, seen, depth + 1)),
        },
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            let shape_key = keys
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join("\u{1f}");
            if !seen.insert(shape_key) {
                return "{...}".to_string();
            }

            let mut parts = Vec::new();
            for key in keys.iter().take(MAX_KEYS) {
                let value_sketch = sketch(&map[key.as_str()], seen, depth + 1);
                parts.push(format!("{indent}  {key}: {value_sketch}"));
            }
            if map.len() > MAX_KEYS {
                parts.push(format!("{indent}  ... ({} more fields)", map.len() - MAX_KEYS));
            }

            format!("{{\n{}\n{indent}}}", parts.join("\n"))
        }
    }
}
