//! Kibana saved-object import sink.
//!
//! Defines the [`DashboardSink`] trait plus [`KibanaSink`], which imports
//! saved objects (a data view and discover sessions) through Kibana's
//! NDJSON import API. The import is best-effort from the pipeline's point
//! of view: a failed import downgrades to a warning on the completed job.

mod client;
mod error;
pub mod objects;
mod traits;

pub use client::KibanaSink;
pub use error::DashboardError;
pub use traits::DashboardSink;
