//! # tlm-engine
//!
//! Shard layout, pure binning, per-put aggregation, cross-put aggregate
//! merging, and the on-disk line codec for both tiers. Part of "the core":
//! deterministic, synchronous, no logging.

pub mod aggregate;
pub mod bin;
pub mod codec;
pub mod merge;
pub mod shard;

pub use aggregate::aggregate as aggregate_samples;
pub use bin::{bin as bin_items, Group};
pub use merge::merge_aggregates;
pub use shard::{enumerate_shards, shard_path};
