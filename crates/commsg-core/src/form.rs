//! Form encoding for request parameters.
//!
//! The message center decodes bodies the way PHP builds them, so nested
//! values are flattened into bracketed keys:
//!
//! ```text
//! {"to": ["a", "b"], "msgBody": {"content": "hi"}}
//!   => to[0]=a, to[1]=b, msgBody[content]=hi
//! ```
//!
//! `null` and empty arrays/objects produce no pairs. Booleans become `1`/`0`.

use crate::Params;
use serde_json::Value;

/// Flatten parameters into ordered `(key, value)` pairs ready for
/// `application/x-www-form-urlencoded` encoding.
pub fn encode(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_value(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push_value(pairs, format!("{key}[{i}]"), item);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                push_value(pairs, format!("{key}[{k}]"), v);
            }
        }
    }
}
