//! JSON rendering of records
//!
//! Objects are built from the descriptor table rather than derived, so the
//! property order always matches the CSV column order.

use serde_json::{Map, Value};

use super::{FieldValue, Record};

/// Build the JSON object for a record, skipping omitted keys
pub fn to_json_value<R: Record>(record: &R) -> Value {
    let mut object = Map::new();
    for spec in R::schema() {
        let Some(key) = spec.json.name() else {
            continue;
        };
        let value = match spec.value(record) {
            FieldValue::Text(text) => Value::String(text.to_string()),
            FieldValue::Count(count) => Value::from(count),
            FieldValue::Flag(flag) => Value::Bool(flag),
        };
        object.insert(key.to_string(), value);
    }
    Value::Object(object)
}

/// Render a record as a 2-space indented JSON document
///
/// Serialization trouble never propagates; the returned text describes the
/// failure instead.
pub fn to_json<R: Record>(record: &R) -> String {
    serde_json::to_string_pretty(&to_json_value(record))
        .unwrap_or_else(|e| format!("error converting {} to JSON: {}", R::NAME, e))
}
