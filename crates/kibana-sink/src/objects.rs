//! Saved-object definition builders.
//!
//! Builds the data view (index pattern) and discover-session saved objects
//! that make generated data browsable in Kibana without manual setup.

use serde_json::{json, Value};

/// Deterministic id for the data view belonging to an index.
pub fn data_view_id(index: &str) -> String {
    format!("{index}-data-view")
}

/// A data-view (index-pattern) saved object over the given index, keyed on
/// `@timestamp`.
pub fn data_view(index: &str) -> Value {
    json!({
        "id": data_view_id(index),
        "type": "index-pattern",
        "attributes": {
            "title": index,
            "timeFieldName": "@timestamp",
        },
        "references": [],
    })
}

/// A discover-session (saved search) object referencing the index's data
/// view.
pub fn discover_session(index: &str, title: &str, columns: &[&str]) -> Value {
    let search_source = json!({
        "query": {"query": "", "language": "kuery"},
        "filter": [],
        "indexRefName": "kibanaSavedObjectMeta.searchSourceJSON.index",
    });

    json!({
        "id": format!("{index}-{}", title.to_lowercase().replace(' ', "-")),
        "type": "search",
        "attributes": {
            "title": format!("{title} ({index})"),
            "columns": columns,
            "sort": [["@timestamp", "desc"]],
            "kibanaSavedObjectMeta": {
                "searchSourceJSON": search_source.to_string(),
            },
        },
        "references": [{
            "id": data_view_id(index),
            "name": "kibanaSavedObjectMeta.searchSourceJSON.index",
            "type": "index-pattern",
        }],
    })
}

/// The default object set for an index: its data view plus a time-sorted
/// discover session showing every document.
pub fn default_objects(index: &str, columns: &[&str]) -> Vec<Value> {
    vec![
        data_view(index),
        discover_session(index, "All documents", columns),
    ]
}
