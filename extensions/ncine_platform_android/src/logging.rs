//! Android logcat output

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use ncine_platform::LoggingConfig;

/// Route `log` and `tracing` records to logcat under `config.tag`
pub fn init(config: &LoggingConfig) {
    // Initialize android_logger for log crate
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag(config.tag.as_str()),
    );

    // Initialize tracing-android for tracing crate
    let layer = match tracing_android::layer(&config.tag) {
        Ok(layer) => layer,
        Err(e) => {
            log::error!("Failed to create tracing layer: {}", e);
            return;
        }
    };
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter).with(layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}
