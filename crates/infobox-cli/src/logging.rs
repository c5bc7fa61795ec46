//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Default filter when neither `--log-level` nor `RUST_LOG` is given
pub const DEFAULT_LEVEL: &str = "info";

/// Filter from an explicit level, else `RUST_LOG`, else [`DEFAULT_LEVEL`]
#[must_use]
pub fn filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    }
}

/// Install the global subscriber writing to stderr
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init(level: Option<&str>, json: bool) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}
