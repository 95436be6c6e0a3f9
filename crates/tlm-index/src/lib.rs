//! # tlm-index
//!
//! Orchestrates ingest fan-out across fidelity tiers and fidelity-aware
//! range queries over the on-disk layout defined by `tlm-engine`. This is
//! the outermost layer of "the core" — still synchronous and silent.

mod index;
mod registry;

pub use index::Index;
pub use tlm_core::{AggregateSample, Fidelity, IngestPoint, QueryPoint, Sample};
