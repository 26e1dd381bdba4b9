//! obs-forge: synthetic observability data for Elasticsearch and Kibana.
//!
//! The library side of the crate hosts the settings store, the asynchronous
//! job machinery, the generation pipeline, and the CSV exporter. Data
//! generators live in `obs-datagen`, and the Elasticsearch / Kibana clients
//! live in their own sink crates behind async traits so the pipeline can be
//! tested against mocks.

pub mod config;
pub mod export;
pub mod job;
pub mod pipeline;

pub use config::Settings;
pub use job::{JobOptions, JobPhase, JobRunner, JobStatus, StatusStore, ValidationError};
pub use pipeline::generate;
