//! Native library bootstrap
//!
//! Makes the engine and its audio backend resident in the process before
//! the host reaches any native entry point. Libraries load in a fixed
//! order (audio backend, then engine). Exactly one of them is tolerated
//! as missing, selected by [`OptionalLibrary`]: its failure is logged and
//! skipped, while a failure of the other one aborts the bootstrap.
//!
//! [`init`] is the process-wide entry point. It runs the sequence once and
//! hands the stored result back on every later call.

use std::fmt;
use std::sync::OnceLock;

use libloading::Library;
use serde::{Deserialize, Serialize};

use crate::config::{BootstrapConfig, LibrariesConfig};
use crate::error::{PlatformError, Result};

/// What a native library provides to the activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryRole {
    /// OpenAL or a compatible audio implementation
    AudioBackend,
    /// The nCine engine itself
    Engine,
}

impl fmt::Display for LibraryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryRole::AudioBackend => f.write_str("audio backend"),
            LibraryRole::Engine => f.write_str("engine"),
        }
    }
}

/// Which library may fail to load without aborting startup
///
/// Never both: the other library is always mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalLibrary {
    /// Run without sound when the audio backend is absent
    #[default]
    AudioBackend,
    /// Keep the activity alive when the engine is absent
    Engine,
}

impl OptionalLibrary {
    pub fn role(self) -> LibraryRole {
        match self {
            OptionalLibrary::AudioBackend => LibraryRole::AudioBackend,
            OptionalLibrary::Engine => LibraryRole::Engine,
        }
    }

    pub fn tolerates(self, role: LibraryRole) -> bool {
        self.role() == role
    }
}

/// A native library identified by its bare name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySpec {
    pub role: LibraryRole,
    /// Name without prefix or extension, e.g. `openal`
    pub name: String,
}

impl LibrarySpec {
    pub fn new(role: LibraryRole, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }

    /// Platform file name handed to the dynamic linker (`libopenal.so`)
    pub fn file_name(&self) -> String {
        libloading::library_filename(&self.name)
            .to_string_lossy()
            .into_owned()
    }
}

/// Result of one load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryLoadOutcome {
    Loaded,
    /// Load failed but the policy tolerates it
    MissingOptional { message: String },
    /// Load failed and the library is mandatory
    MissingFatal { message: String },
}

impl LibraryLoadOutcome {
    /// Classify a load attempt against the tolerance policy
    pub fn classify<H>(
        spec: &LibrarySpec,
        policy: OptionalLibrary,
        attempt: &std::result::Result<H, String>,
    ) -> Self {
        match attempt {
            Ok(_) => LibraryLoadOutcome::Loaded,
            Err(message) if policy.tolerates(spec.role) => LibraryLoadOutcome::MissingOptional {
                message: message.clone(),
            },
            Err(message) => LibraryLoadOutcome::MissingFatal {
                message: message.clone(),
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LibraryLoadOutcome::Loaded)
    }
}

/// Seam to the dynamic linker
pub trait LibraryLoader {
    /// Keeps the library mapped while alive
    type Handle;

    /// Load a library by platform file name, returning the linker's message on failure
    fn load(&self, file_name: &str) -> std::result::Result<Self::Handle, String>;
}

/// Loads libraries through the system dynamic linker
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicLoader;

impl LibraryLoader for DynamicLoader {
    type Handle = Library;

    fn load(&self, file_name: &str) -> std::result::Result<Library, String> {
        // SAFETY: loading runs the library's initializers. The names come
        // from the shim configuration and point at libraries packaged with
        // the APK.
        unsafe { Library::new(file_name) }.map_err(|e| e.to_string())
    }
}

/// Outcomes of one completed bootstrap, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    entries: Vec<(LibrarySpec, LibraryLoadOutcome)>,
}

impl BootstrapReport {
    pub fn entries(&self) -> &[(LibrarySpec, LibraryLoadOutcome)] {
        &self.entries
    }

    pub fn outcome(&self, role: LibraryRole) -> Option<&LibraryLoadOutcome> {
        self.entries
            .iter()
            .find(|(spec, _)| spec.role == role)
            .map(|(_, outcome)| outcome)
    }

    /// Libraries that were skipped under the tolerance policy
    pub fn missing(&self) -> impl Iterator<Item = &LibrarySpec> {
        self.entries
            .iter()
            .filter(|(_, outcome)| !outcome.is_loaded())
            .map(|(spec, _)| spec)
    }

    /// True when the process runs without one of its libraries
    pub fn is_degraded(&self) -> bool {
        self.missing().next().is_some()
    }
}

/// A completed load sequence holding every loaded library
pub struct Bootstrap<L: LibraryLoader> {
    report: BootstrapReport,
    _handles: Vec<L::Handle>,
}

impl<L: LibraryLoader> fmt::Debug for Bootstrap<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl<L: LibraryLoader> Bootstrap<L> {
    /// Load the configured libraries in order
    ///
    /// Stops at the first mandatory failure without attempting the
    /// remaining libraries. No attempt is retried.
    pub fn run(loader: &L, libraries: &LibrariesConfig) -> Result<Self> {
        let mut report = BootstrapReport::default();
        let mut handles = Vec::new();

        for spec in libraries.load_order() {
            let file_name = spec.file_name();
            let attempt = loader.load(&file_name);

            match LibraryLoadOutcome::classify(&spec, libraries.optional, &attempt) {
                LibraryLoadOutcome::Loaded => {
                    tracing::debug!("Loaded {} library {}", spec.role, file_name);
                }
                LibraryLoadOutcome::MissingOptional { message } => {
                    tracing::warn!(
                        "Caught load failure for optional {} library '{}': {}",
                        spec.role,
                        spec.name,
                        message
                    );
                    report
                        .entries
                        .push((spec, LibraryLoadOutcome::MissingOptional { message }));
                    continue;
                }
                LibraryLoadOutcome::MissingFatal { message } => {
                    return Err(PlatformError::LibraryLoad {
                        library: spec.name,
                        message,
                    });
                }
            }

            if let Ok(handle) = attempt {
                handles.push(handle);
            }
            report.entries.push((spec, LibraryLoadOutcome::Loaded));
        }

        Ok(Self {
            report,
            _handles: handles,
        })
    }

    pub fn report(&self) -> &BootstrapReport {
        &self.report
    }
}

static BOOTSTRAP: OnceLock<Result<Bootstrap<DynamicLoader>>> = OnceLock::new();

/// Run the process-wide bootstrap
///
/// Only the first call loads anything; its result, success or failure, is
/// returned unchanged on every later call and the config passed then is
/// ignored. Loaded libraries stay resident until the process exits.
///
/// A config rejected by [`BootstrapConfig::validate`] fails with
/// [`PlatformError::Config`] before any load attempt and is not stored.
pub fn init(config: &BootstrapConfig) -> Result<&'static BootstrapReport> {
    if BOOTSTRAP.get().is_none() {
        config.validate()?;
    }

    let bootstrap = BOOTSTRAP.get_or_init(|| {
        tracing::debug!(
            "Loading native libraries (optional: {})",
            config.libraries.optional.role()
        );
        Bootstrap::run(&DynamicLoader, &config.libraries)
    });

    match bootstrap {
        Ok(bootstrap) => Ok(bootstrap.report()),
        Err(e) => Err(e.clone()),
    }
}

/// Whether [`init`] has already run in this process
pub fn is_initialized() -> bool {
    BOOTSTRAP.get().is_some()
}
