//! Per-data-kind entry generators.
//!
//! Each generator owns a seeded RNG and a fixed one-year time window, and
//! produces exactly one complete record per [`EntryGenerator::generate_entry`]
//! call. Configuration is fixed at construction; calls have no side effects
//! beyond consuming the generator's randomness.

pub mod alerts;
pub mod apm;
pub mod metrics;
pub mod network;
pub mod security;
pub mod structured;
pub mod traces;
pub mod unstructured;

pub use alerts::AlertGenerator;
pub use apm::ApmGenerator;
pub use metrics::MetricGenerator;
pub use network::NetworkTrafficGenerator;
pub use security::SecurityEventGenerator;
pub use structured::StructuredLogGenerator;
pub use traces::TraceGenerator;
pub use unstructured::UnstructuredLogGenerator;

use crate::record::Record;

/// Produces one record per call.
///
/// Template interpolation failures inside a generator degrade to a
/// placeholder value; `generate_entry` never fails.
pub trait EntryGenerator: Send {
    fn generate_entry(&mut self) -> Record;
}

/// Unwrap a `json!` object literal into a [`Record`].
pub(crate) fn obj(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("generator record literals are always objects"),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Record;
    use chrono::DateTime;

    /// Assert a record carries the given field.
    pub fn assert_has(record: &Record, field: &str) {
        assert!(record.contains_key(field), "missing field '{field}': {record:?}");
    }

    /// Assert `@timestamp` is present and parses as ISO-8601 UTC.
    pub fn assert_valid_timestamp(record: &Record) {
        let ts = record["@timestamp"]
            .as_str()
            .expect("@timestamp must be a string");
        assert!(ts.ends_with('Z'), "timestamp not UTC: {ts}");
        DateTime::parse_from_rfc3339(ts).expect("timestamp must parse");
    }
}
