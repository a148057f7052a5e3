//! nCine Android Platform
//!
//! JNI bridge between the nCine activity and [`ncine_platform`].
//!
//! The library is loaded by the activity's static initializer.
//! `JNI_OnLoad` runs the native library bootstrap with the packaged
//! `bootstrap.toml`; the activity then forwards `onCreate`, `onResume` and
//! system UI visibility changes to the exported `native*` methods, which
//! keep the window immersive.

pub mod activity;
pub mod config;
#[cfg(target_os = "android")]
pub mod decor_view;
#[cfg(target_os = "android")]
pub mod logging;
#[cfg(target_os = "android")]
pub mod version;

pub use activity::{bootstrap, ActivityBridge};
pub use config::{embedded_config, jni_error};
