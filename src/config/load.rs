use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `SQUONK__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SQUONK")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ingest.extensions"),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.store.lock_timeout_ms == 0 {
            return Err("store.lock_timeout_ms must be >= 1".to_string());
        }
        if self.store.io_timeout_ms == 0 {
            return Err("store.io_timeout_ms must be >= 1".to_string());
        }
        if self.runtime.workers == 0 {
            return Err("runtime.workers must be >= 1".to_string());
        }
        if self
            .ingest
            .extensions
            .iter()
            .all(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err("ingest.extensions must list at least one extension".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `SQUONK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SQUONK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/squonk/config.toml`
/// or `~/.config/squonk/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("squonk").join("config.toml"))
}
