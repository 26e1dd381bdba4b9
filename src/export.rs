//! CSV export of generated records.
//!
//! Files are written as `<kind>_dataset_<NNNN>.csv` with a monotonically
//! increasing sequence number per kind, so repeated exports into the same
//! directory never clobber each other. The header is the sorted union of
//! every flattened key in the batch; rows are ordered by `@timestamp`.

use anyhow::Context;
use obs_datagen::{flatten_record, DataKind, Record};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Next free 4-digit sequence number for a kind in a directory.
pub fn next_sequence_number(dir: &Path, kind: DataKind) -> anyhow::Result<u32> {
    let prefix = format!("{}_dataset_", kind.id());
    let mut max_seen = 0u32;

    if dir.exists() {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(rest) = name.strip_prefix(&prefix) {
                if let Some(number) = rest.strip_suffix(".csv") {
                    if let Ok(n) = number.parse::<u32>() {
                        max_seen = max_seen.max(n);
                    }
                }
            }
        }
    }

    Ok(max_seen + 1)
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Write a batch of records to the next sequenced CSV file for the kind.
///
/// Returns the path of the file written.
pub fn write_csv(records: &[Record], kind: DataKind, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let flattened: Vec<_> = records.iter().map(flatten_record).collect();

    let mut columns: BTreeSet<String> = BTreeSet::new();
    for row in &flattened {
        columns.extend(row.keys().cloned());
    }
    let columns: Vec<String> = columns.into_iter().collect();

    let mut rows = flattened;
    rows.sort_by(|a, b| {
        let ta = a.get("@timestamp").map(cell).unwrap_or_default();
        let tb = b.get("@timestamp").map(cell).unwrap_or_default();
        ta.cmp(&tb)
    });

    let sequence = next_sequence_number(dir, kind)?;
    let path = dir.join(format!("{}_dataset_{:04}.csv", kind.id(), sequence));

    let file = File::create(&path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer.write_record(&columns)?;
    for row in &rows {
        let record: Vec<String> = columns
            .iter()
            .map(|column| row.get(column).map(cell).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(path)
}
