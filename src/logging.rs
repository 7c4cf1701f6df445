//! Diagnostic logging
//!
//! Report output goes to stdout; tracing events go to stderr so they never
//! mix with machine-readable results.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "RMASSETS_LOG";

/// Initialize the stderr subscriber.
///
/// `RMASSETS_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool, ansi: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(ansi)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    tracing::debug!("logging initialized at {}", default_level);

    Ok(())
}
