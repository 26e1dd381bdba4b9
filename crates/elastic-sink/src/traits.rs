//! Ingestion sink trait definition.

use crate::error::SinkError;
use obs_datagen::Record;

/// Outcome of an `ensure_index` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureIndex {
    /// The index was created with the supplied mapping.
    Created,
    /// The index already existed; the existing mapping is left untouched.
    AlreadyExists,
}

/// Trait for writing generated records to a search/analytics engine.
///
/// The pipeline is generic over this trait, so the concrete sink is chosen
/// once at the entry point and all downstream code is statically dispatched.
#[async_trait::async_trait]
pub trait IngestSink: Send + Sync {
    /// Create the target index with the given field mapping if it does not
    /// exist yet.
    async fn ensure_index(
        &self,
        name: &str,
        mapping: &serde_json::Value,
    ) -> Result<EnsureIndex, SinkError>;

    /// Bulk-write a batch of records into the named index.
    async fn bulk_write(&self, name: &str, records: &[Record]) -> Result<(), SinkError>;
}
