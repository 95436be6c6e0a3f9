//! Deterministic mapping from (fidelity, dataset, timestamp) to a file path,
//! and enumeration of the shards a query window touches.
//!
//! The directory depth grows with how far a tier's `file_span` extends past
//! the coarser `a`/`b`/`c` truncations (`10_000_000`, `100_000`, `1_000`
//! seconds respectively) — the same fan-out idea as a content-addressable
//! store's hash-prefix directories, generalized from a fixed 2-level split
//! to a depth that varies per tier.

use std::path::PathBuf;

use tlm_core::{Error, Fidelity, Result, MAX_SHARDS};

/// Compute the on-disk path for the shard containing `timestamp` at `tier`,
/// for `dataset`, rooted at `data_root` (i.e. `BASE/data`).
pub fn shard_path(data_root: &std::path::Path, tier: Fidelity, dataset: &str, timestamp: i64) -> Result<PathBuf> {
    if timestamp < 0 {
        return Err(Error::NegativeTimestamp(timestamp as f64));
    }
    let a = timestamp / 10_000_000;
    let b = timestamp / 100_000;
    let c = timestamp / 1_000;
    let name = timestamp / tier.file_span() as i64;

    let mut path = data_root.join(tier.dir_name()).join(dataset);
    match tier {
        Fidelity::Full => {
            path = path.join(a.to_string()).join(b.to_string()).join(c.to_string());
        }
        Fidelity::F1 | Fidelity::F10 => {
            path = path.join(a.to_string()).join(b.to_string());
        }
        Fidelity::F100 | Fidelity::F1000 => {
            path = path.join(a.to_string());
        }
        Fidelity::F10000 | Fidelity::F100000 => {}
    }
    Ok(path.join(name.to_string()))
}

/// Enumerate the (possibly duplicated) shard paths a query over
/// `[start, end]` touches at `tier`. Mirrors the reference implementation's
/// loop: always emits at least one path, and one trailing path past `end` to
/// guard the case where `end` rounds up into the next shard.
pub fn enumerate_shards(
    data_root: &std::path::Path,
    tier: Fidelity,
    dataset: &str,
    start: i64,
    end: i64,
) -> Result<Vec<PathBuf>> {
    let step = tier.file_span() as i64;
    let span = (end - start).max(0);
    if span as f64 / step as f64 > MAX_SHARDS as f64 {
        return Err(Error::WindowTooLarge {
            shards: (span / step) as usize,
            max: MAX_SHARDS,
        });
    }

    let mut paths = Vec::new();
    let mut t = start;
    loop {
        paths.push(shard_path(data_root, tier, dataset, t)?);
        if t > end {
            break;
        }
        t += step;
    }
    Ok(paths)
}
