//! Elasticsearch ingestion sink.
//!
//! This crate defines the [`IngestSink`] trait the generation pipeline
//! writes through, plus [`ElasticsearchSink`], a reqwest-based
//! implementation that creates indices with explicit field mappings and
//! bulk-loads records over the `_bulk` NDJSON API.
//!
//! The trait keeps the pipeline independent of the concrete sink, so tests
//! exercise the full job flow against in-memory fakes.

mod client;
mod error;
mod traits;

pub use client::{ElasticsearchSink, BULK_CHUNK_SIZE};
pub use error::SinkError;
pub use traits::{EnsureIndex, IngestSink};
