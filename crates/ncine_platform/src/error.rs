//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A mandatory native library could not be loaded
    #[error("Failed to load native library '{library}': {message}")]
    LibraryLoad { library: String, message: String },

    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A JNI call into the host runtime failed
    #[error("JNI call failed: {0}")]
    Jni(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
