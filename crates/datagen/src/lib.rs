//! Synthetic observability data generation.
//!
//! This crate produces structurally valid, semantically plausible
//! observability records for eight data kinds: unstructured logs, structured
//! logs, distributed trace spans, metric samples, security events, alerts,
//! network flows, and APM transactions.
//!
//! Each data kind has a dedicated [`EntryGenerator`] that composes
//! randomized field synthesis ([`synth`]), weighted categorical choices
//! ([`weighted`]), and template-based message rendering ([`template`]) into
//! one complete [`Record`] per call. Generators are seeded, so the same seed
//! always produces the same stream of records.
//!
//! # Example
//!
//! ```ignore
//! use obs_datagen::DataKind;
//!
//! let mut generator = DataKind::StructuredLogs.build_generator(42);
//! let record = generator.generate_entry();
//! assert!(record.contains_key("@timestamp"));
//! ```

pub mod flatten;
pub mod generators;
pub mod kind;
pub mod record;
pub mod synth;
pub mod template;
pub mod weighted;

pub use flatten::flatten_record;
pub use generators::EntryGenerator;
pub use kind::{DataKind, UnknownKind};
pub use record::{format_timestamp, Record, TimeWindow};
pub use template::{render, MissingField, FALLBACK_MESSAGE};
