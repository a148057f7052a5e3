//! Host-side diagnostic output
//!
//! Installs a `tracing` subscriber that writes to stderr. Android builds
//! route through logcat instead (see `ncine_platform_android::logging`).

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global stderr subscriber
///
/// `RUST_LOG` takes precedence over `config.filter`. Returns `false` when a
/// global subscriber was already set, leaving it untouched.
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
