//! # tlm-config
//!
//! The only place a running telemetry-index process resolves its base path
//! and logging verbosity from disk/environment. Deliberately thin: the
//! index itself (`tlm-index::Index::open`) just takes a `base_path` and
//! knows nothing about config files or environment variables — this crate
//! exists to resolve that one value for a caller (the external HTTP layer,
//! or a test harness), not to be a pervasive global like a larger service
//! might carry.
//!
//! Resolution order, same as the teacher's layered config: defaults → an
//! optional `tlm.toml` → environment variable overrides.

pub mod logging;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub use logging::{init_logging, LogLevel};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn default_base_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".tlm").join("data")
}

/// Where the index keeps its on-disk tree, and at what verbosity a caller
/// should initialize logging.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_path: PathBuf,
    pub log_level: LogLevel,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            log_level: LogLevel::default(),
        }
    }
}

/// On-disk shape of an optional `tlm.toml`. Only `base_path` is
/// file-configurable; log level is environment-only (`TLM_LOG`), matching
/// the teacher's env-overrides-everything precedence for runtime knobs.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    store: Option<FileStoreSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct FileStoreSection {
    base_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolve config for a project rooted at `project_root`: defaults, then
    /// `<project_root>/tlm.toml` if present, then `TLM_BASE_PATH`/`TLM_LOG`
    /// environment overrides.
    pub fn load_for(project_root: &Path) -> Result<StoreConfig, ConfigError> {
        let mut config = StoreConfig::default();

        let file_path = project_root.join("tlm.toml");
        if file_path.exists() {
            let contents = std::fs::read_to_string(&file_path).map_err(|source| ConfigError::Io {
                path: file_path.clone(),
                source,
            })?;
            let file_config: FileConfig =
                toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                    path: file_path.clone(),
                    source,
                })?;
            if let Some(base_path) = file_config.store.and_then(|s| s.base_path) {
                config.base_path = base_path;
            }
        }

        if let Ok(path) = std::env::var("TLM_BASE_PATH") {
            config.base_path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var("TLM_LOG") {
            config.log_level = match level.to_ascii_lowercase().as_str() {
                "error" => LogLevel::Error,
                "warn" => LogLevel::Warn,
                "debug" => LogLevel::Debug,
                "trace" => LogLevel::Trace,
                _ => LogLevel::Info,
            };
        }

        Ok(config)
    }
}
