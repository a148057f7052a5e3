//! Platform API level lookup

use std::sync::OnceLock;

use jni::JNIEnv;

use ncine_platform::Result;

use crate::config::jni_error;

static SDK_VERSION: OnceLock<u32> = OnceLock::new();

/// `android.os.Build.VERSION.SDK_INT`, read once per process
///
/// Falls back to 0 when the field is unreadable, which selects the tier
/// that leaves the window flags alone.
pub fn sdk_version(env: &mut JNIEnv) -> u32 {
    if let Some(version) = SDK_VERSION.get() {
        return *version;
    }

    match query_sdk_int(env) {
        Ok(version) => {
            tracing::debug!("Android API version - JNI: {}", version);
            *SDK_VERSION.get_or_init(|| version)
        }
        Err(e) => {
            if env.exception_check().unwrap_or(false) {
                if let Err(clear) = env.exception_clear() {
                    tracing::debug!("exception_clear failed: {}", clear);
                }
            }
            tracing::error!("Cannot read static field SDK_INT: {}", e);
            0
        }
    }
}

fn query_sdk_int(env: &mut JNIEnv) -> Result<u32> {
    let sdk_int = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .and_then(|value| value.i())
        .map_err(|e| jni_error("Build.VERSION.SDK_INT", e))?;
    Ok(sdk_int.max(0) as u32)
}
