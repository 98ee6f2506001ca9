use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/squonk/config.toml` or `~/.config/squonk/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SQUONK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub admin: AdminSettings,
    pub ingest: IngestSettings,
    pub runtime: RuntimeSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Location of the JSON snapshot holding every group queue.
    pub path: PathBuf,
    /// How long a mutation waits for the store lock before giving up (milliseconds).
    pub lock_timeout_ms: u64,
    /// How long a load or save may take on the backing file (milliseconds).
    pub io_timeout_ms: u64,
}

impl StoreSettings {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("songs.json"),
            lock_timeout_ms: 2000,
            io_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    /// User id of the privileged operator. `0` means nobody is privileged.
    pub operator_id: u64,
}

impl AdminSettings {
    pub fn is_operator(&self, user_id: u64) -> bool {
        self.operator_id != 0 && self.operator_id == user_id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// File extensions accepted for upload and import (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether directory imports recurse into subdirectories.
    pub recursive: bool,
    /// Whether to follow symlinks during directory imports.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles) in imports.
    pub include_hidden: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            recursive: true,
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Number of handler threads serving inbound commands.
    pub workers: usize,
    /// Reply to `/start`.
    pub welcome_text: String,
    /// Caption attached to every audio reply.
    pub play_caption: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            workers: 4,
            welcome_text: "👋 Welcome to Squonk Radio V0.4.7!\nUse /setup to link your group."
                .to_string(),
            play_caption: "🎶 Squonking time!".to_string(),
        }
    }
}
