//! Stored-form field ordering.
//!
//! Top-level fields sort by ascending "length" of their value: string length,
//! array length, or object key count depending on type. Scalars and nulls
//! count as zero and sort to the front. The sort is stable, so equal-length
//! fields keep their declaration order and the output is reproducible
//! bit-for-bit.

use serde_json::Value;

/// Reorder a JSON object's top-level keys by ascending value length.
pub fn reorder_top_level(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by_key(|(_, v)| value_len(v));
            Value::Object(entries.into_iter().collect())
        }
        other => other,
    }
}

fn value_len(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 0,
    }
}
