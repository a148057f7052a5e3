//! Configuration packaged into the shim library

use ncine_platform::{BootstrapConfig, PlatformError, Result};

/// Contents of `bootstrap.toml`, fixed at build time
pub const BOOTSTRAP_TOML: &str = include_str!("../bootstrap.toml");

/// Parse the packaged configuration
pub fn embedded_config() -> Result<BootstrapConfig> {
    BootstrapConfig::from_toml_str(BOOTSTRAP_TOML)
}

/// Wrap a failed JNI call as [`PlatformError::Jni`]
pub fn jni_error(call: &str, error: impl std::fmt::Display) -> PlatformError {
    PlatformError::Jni(format!("{}: {}", call, error))
}
