//! Window decor view reached through JNI
//!
//! Must be used on the UI thread: `View.setSystemUiVisibility` throws
//! `CalledFromWrongThreadException` anywhere else.

use jni::objects::{JObject, JValue};
use jni::JNIEnv;

use ncine_platform::{Result, SystemUiFlags, SystemUiHost};

use crate::config::jni_error;

/// [`SystemUiHost`] backed by `activity.getWindow().getDecorView()`
pub struct DecorView<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    activity: &'a JObject<'a>,
}

impl<'a, 'local> DecorView<'a, 'local> {
    pub fn new(env: &'a mut JNIEnv<'local>, activity: &'a JObject<'a>) -> Self {
        Self { env, activity }
    }

    fn try_set_visibility(&mut self, flags: SystemUiFlags) -> Result<()> {
        let window = self
            .env
            .call_method(self.activity, "getWindow", "()Landroid/view/Window;", &[])
            .and_then(|value| value.l())
            .map_err(|e| jni_error("getWindow", e))?;
        let decor_view = self
            .env
            .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])
            .and_then(|value| value.l())
            .map_err(|e| jni_error("getDecorView", e))?;
        self.env
            .call_method(
                &decor_view,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(flags.to_visibility())],
            )
            .map_err(|e| jni_error("setSystemUiVisibility", e))?;
        Ok(())
    }

    fn try_watch_visibility(&mut self) -> Result<()> {
        self.env
            .call_method(self.activity, "watchSystemUiVisibility", "()V", &[])
            .map_err(|e| jni_error("watchSystemUiVisibility", e))?;
        Ok(())
    }

    /// Host calls never fail from the caller's point of view
    fn absorb(&mut self, result: Result<()>) {
        let Err(e) = result else {
            return;
        };
        if self.env.exception_check().unwrap_or(false) {
            if let Err(describe) = self.env.exception_describe() {
                tracing::debug!("exception_describe failed: {}", describe);
            }
            if let Err(clear) = self.env.exception_clear() {
                tracing::debug!("exception_clear failed: {}", clear);
            }
        }
        tracing::debug!("{}", e);
    }
}

impl SystemUiHost for DecorView<'_, '_> {
    fn set_system_ui_visibility(&mut self, flags: SystemUiFlags) {
        let result = self.try_set_visibility(flags);
        self.absorb(result);
    }

    fn watch_system_ui_visibility(&mut self) {
        let result = self.try_watch_visibility();
        self.absorb(result);
    }
}
