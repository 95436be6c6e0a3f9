use std::io;

use thiserror::Error;

/// Errors raised by the telemetry index and its supporting components.
///
/// No variant here is recovered internally — every failure is surfaced to the
/// caller. The core itself never logs or prints; see `tlm-config` for the
/// ambient logging layer a caller can wire up around it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid dataset id: {0:?}")]
    InvalidId(String),

    #[error("timestamp would be negative: {0}")]
    NegativeTimestamp(f64),

    #[error("query window too large: would enumerate {shards} shards (max {max})")]
    WindowTooLarge { shards: usize, max: usize },

    #[error("store path exists but is not a directory: {0}")]
    StoreNotDirectory(std::path::PathBuf),

    #[error("could not parse date string {0:?}")]
    DateParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
