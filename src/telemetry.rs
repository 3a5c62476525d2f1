use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not provided
pub const DEFAULT_LOG_FILTER: &str = "streamflix=info,tower_http=info";

/// Installs the global tracing subscriber.
///
/// Fails if a subscriber has already been installed.
pub fn init_tracing() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
