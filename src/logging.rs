//! Diagnostic logging setup for the binary.
//!
//! Library code emits `tracing` events; nothing is printed unless the binary
//! installs the subscriber below. Diagnostics go to stderr so stdout stays
//! reserved for command output.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or everything
/// down to `debug` when `verbose` is on.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()?;

    Ok(())
}
