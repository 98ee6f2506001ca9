use tracing_subscriber::EnvFilter;

use crate::config;

/// Install the stderr log subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("squonk=info"));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent startup.
            tracing::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
