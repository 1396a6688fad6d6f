//! Tracing setup. Logs go to stderr; stdout is reserved for JSON output.

use crate::Result;
use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Install the global subscriber.
///
/// Filter precedence: explicit `level`, then `RUST_LOG`, then `info`.
pub fn init(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL)),
    }
    .context("failed to configure tracing level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
