//! nCine Platform
//!
//! Host-independent half of the nCine Android shim.
//!
//! Two leaf components live here:
//!
//! - [`library`]: loads the native audio backend and engine libraries once
//!   per process, tolerating the absence of whichever one the
//!   [`OptionalLibrary`] policy names.
//! - [`presentation`]: maps the platform tier and the activity lifecycle
//!   event to the system UI flags that keep the window immersive.
//!
//! Nothing here talks to a device. The Android extension supplies the
//! [`SystemUiHost`] implementation and the lifecycle callbacks.

pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod presentation;

pub use config::{BootstrapConfig, LibrariesConfig, LoggingConfig};
pub use error::{PlatformError, Result};
pub use library::{
    Bootstrap, BootstrapReport, DynamicLoader, LibraryLoadOutcome, LibraryLoader, LibraryRole,
    LibrarySpec, OptionalLibrary,
};
pub use presentation::{
    flags_for, flags_for_event, ImmersivePresentation, LifecycleEvent, PresentationTier,
    SystemUiFlags, SystemUiHost,
};
