//! # tlm-core
//!
//! Core data model for the telemetry index: sample types, the fidelity
//! table, dataset id validation, the error taxonomy, and ISO-8601 wall-clock
//! conversion at the public API boundary.
//!
//! This crate (along with `tlm-engine` and `tlm-index`) is "the core":
//! deterministic, synchronous, and silent — it never logs or prints. See
//! `tlm-config` for process-wide logging setup a caller may wire up around
//! it.

mod dataset_id;
mod error;
mod fidelity;
mod sample;
pub mod wallclock;

pub use dataset_id::validate_dataset_id;
pub use error::{Error, Result};
pub use fidelity::{Fidelity, GROUP, MAX_SHARDS};
pub use sample::{AggregateSample, IngestPoint, QueryPoint, Sample};
