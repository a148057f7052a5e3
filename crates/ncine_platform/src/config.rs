//! Bootstrap configuration handling
//!
//! ```toml
//! [libraries]
//! audio_backend = "openal"
//! engine = "ncine"
//! optional = "audio_backend"
//!
//! [logging]
//! filter = "info"
//! tag = "nCine"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PlatformError, Result};
use crate::library::{LibraryRole, LibrarySpec, OptionalLibrary};

/// Top-level shim configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub libraries: LibrariesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Native libraries to load and the tolerance policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibrariesConfig {
    /// Bare name of the audio backend library (`openal` -> `libopenal.so`)
    #[serde(default = "default_audio_backend")]
    pub audio_backend: String,
    /// Bare name of the engine library
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Which of the two libraries may be absent
    #[serde(default)]
    pub optional: OptionalLibrary,
}

fn default_audio_backend() -> String {
    "openal".to_string()
}

fn default_engine() -> String {
    "ncine".to_string()
}

impl Default for LibrariesConfig {
    fn default() -> Self {
        Self {
            audio_backend: default_audio_backend(),
            engine: default_engine(),
            optional: OptionalLibrary::default(),
        }
    }
}

/// Diagnostic output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Logcat tag on Android
    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_tag() -> String {
    "nCine".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            tag: default_tag(),
        }
    }
}

impl LibrariesConfig {
    /// Libraries in load order: audio backend first, then engine
    pub fn load_order(&self) -> [LibrarySpec; 2] {
        [
            LibrarySpec::new(LibraryRole::AudioBackend, &self.audio_backend),
            LibrarySpec::new(LibraryRole::Engine, &self.engine),
        ]
    }
}

impl BootstrapConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BootstrapConfig =
            toml::from_str(content).map_err(|e| PlatformError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PlatformError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlatformError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let libs = &self.libraries;
        for (role, name) in [("audio_backend", &libs.audio_backend), ("engine", &libs.engine)] {
            if name.trim().is_empty() {
                return Err(PlatformError::Config(format!(
                    "libraries.{} must not be empty",
                    role
                )));
            }
        }
        if libs.audio_backend == libs.engine {
            return Err(PlatformError::Config(format!(
                "audio backend and engine both name '{}'",
                libs.engine
            )));
        }
        Ok(())
    }
}
