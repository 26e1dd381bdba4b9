//! Nested-record flattening for tabular export.
//!
//! Converts a possibly-nested [`Record`] into a single-level mapping of
//! dot-joined path to scalar, suitable for delimited-file rows. Nested
//! mappings recurse; sequences are serialized to a JSON-encoded string;
//! scalars pass through unchanged.

use crate::record::Record;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flatten a record into a sorted path-to-scalar mapping.
///
/// Pure: flattening the same record twice yields identical output, and a
/// record with no nested structure comes back unchanged.
pub fn flatten_record(record: &Record) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    for (key, value) in record {
        flatten_value(key, value, &mut out);
    }
    out
}

fn flatten_value(path: &str, value: &Value, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten_value(&format!("{path}.{key}"), nested, out);
            }
        }
        Value::Array(_) => {
            let encoded =
                serde_json::to_string(value).expect("in-memory JSON values always serialize");
            out.insert(path.to_string(), Value::String(encoded));
        }
        scalar => {
            out.insert(path.to_string(), scalar.clone());
        }
    }
}
