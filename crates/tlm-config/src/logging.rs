//! Process-wide logging setup. Kept separate from `tlm-core`/`tlm-engine`/
//! `tlm-index` on purpose: the index itself never logs, so this only
//! matters to a caller (e.g. the external HTTP layer) that wants a
//! `tracing` subscriber installed before it opens an `Index`.

/// Logging verbosity, mapped onto a `tracing` filter directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Initialize the global `tracing` subscriber. Call once at process startup.
/// Honors `RUST_LOG` if set, falling back to `level`.
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
