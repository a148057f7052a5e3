//! Activity lifecycle entry points
//!
//! Java side contract for `org.ncine.NativeBootstrapActivity`
//! (a `NativeActivity` subclass):
//!
//! ```java
//! static { System.loadLibrary("ncine_platform_android"); }
//!
//! private native void nativeOnCreate();
//! private native void nativeOnResume();
//! private native void nativeOnSystemUiVisibilityChange(int visibility);
//!
//! // Called back from native code on API 19+
//! void watchSystemUiVisibility() {
//!     getWindow().getDecorView().setOnSystemUiVisibilityChangeListener(
//!         v -> nativeOnSystemUiVisibilityChange(v));
//! }
//! ```
//!
//! Every callback arrives on the UI thread, one at a time.

use std::sync::{Mutex, PoisonError};

use ncine_platform::{
    library, BootstrapConfig, ImmersivePresentation, LifecycleEvent, PresentationTier,
    SystemUiFlags, SystemUiHost,
};

/// Per-process presentation state shared by the exported callbacks
#[derive(Debug, Default)]
pub struct ActivityBridge {
    presentation: Option<ImmersivePresentation>,
}

impl ActivityBridge {
    pub const fn new() -> Self {
        Self { presentation: None }
    }

    /// Forward one lifecycle event to the presentation controller
    ///
    /// `Create` starts a fresh controller since a recreated activity owns a
    /// new decor view without a listener.
    pub fn dispatch<H: SystemUiHost>(
        &mut self,
        tier: PresentationTier,
        event: LifecycleEvent,
        host: &mut H,
    ) -> Option<SystemUiFlags> {
        if event == LifecycleEvent::Create {
            self.presentation = None;
        }
        let presentation = self
            .presentation
            .get_or_insert_with(|| ImmersivePresentation::new(tier));
        presentation.set_tier(tier);

        let applied = presentation.handle(event, host);
        tracing::trace!(?tier, ?event, ?applied, "system UI update");
        applied
    }
}

#[cfg_attr(not(target_os = "android"), allow(dead_code))]
static BRIDGE: Mutex<ActivityBridge> = Mutex::new(ActivityBridge::new());

/// Run the process-wide library bootstrap, returning whether startup may continue
pub fn bootstrap(config: &BootstrapConfig) -> bool {
    match library::init(config) {
        Ok(report) => {
            tracing::debug!("Native libraries ready (degraded: {})", report.is_degraded());
            true
        }
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}

#[cfg_attr(not(target_os = "android"), allow(dead_code))]
fn with_bridge<R>(f: impl FnOnce(&mut ActivityBridge) -> R) -> R {
    let mut bridge = BRIDGE.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut bridge)
}

#[cfg(target_os = "android")]
mod exports {
    use std::os::raw::c_void;

    use jni::objects::JObject;
    use jni::sys::{jint, JNI_ERR, JNI_VERSION_1_6};
    use jni::{JNIEnv, JavaVM};

    use ncine_platform::{LifecycleEvent, LoggingConfig, PresentationTier, SystemUiFlags};

    use crate::decor_view::DecorView;
    use crate::version::sdk_version;

    /// Library load hook, the native counterpart of the activity's class initializer
    ///
    /// Returning `JNI_ERR` makes `System.loadLibrary` throw, which aborts
    /// activity startup.
    #[allow(non_snake_case)]
    #[no_mangle]
    pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
        let config = match crate::config::embedded_config() {
            Ok(config) => config,
            Err(e) => {
                crate::logging::init(&LoggingConfig::default());
                tracing::error!("{}", e);
                return JNI_ERR;
            }
        };
        crate::logging::init(&config.logging);

        if super::bootstrap(&config) {
            JNI_VERSION_1_6
        } else {
            JNI_ERR
        }
    }

    fn on_event(env: &mut JNIEnv, activity: &JObject, event: LifecycleEvent) {
        let tier = PresentationTier::from_sdk(sdk_version(env));
        let mut decor_view = DecorView::new(env, activity);
        super::with_bridge(|bridge| bridge.dispatch(tier, event, &mut decor_view));
    }

    #[no_mangle]
    pub extern "system" fn Java_org_ncine_NativeBootstrapActivity_nativeOnCreate<'local>(
        mut env: JNIEnv<'local>,
        activity: JObject<'local>,
    ) {
        on_event(&mut env, &activity, LifecycleEvent::Create);
    }

    #[no_mangle]
    pub extern "system" fn Java_org_ncine_NativeBootstrapActivity_nativeOnResume<'local>(
        mut env: JNIEnv<'local>,
        activity: JObject<'local>,
    ) {
        on_event(&mut env, &activity, LifecycleEvent::Resume);
    }

    #[no_mangle]
    pub extern "system" fn Java_org_ncine_NativeBootstrapActivity_nativeOnSystemUiVisibilityChange<
        'local,
    >(
        mut env: JNIEnv<'local>,
        activity: JObject<'local>,
        visibility: jint,
    ) {
        let event = LifecycleEvent::SystemUiVisibilityChange {
            visibility: SystemUiFlags::from_visibility(visibility),
        };
        on_event(&mut env, &activity, event);
    }
}
