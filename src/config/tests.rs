use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_squonk_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SQUONK_CONFIG_PATH", "/tmp/squonk-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/squonk-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("squonk")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("squonk")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid_and_privilege_nobody() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.store.path, std::path::PathBuf::from("songs.json"));
    assert_eq!(s.ingest.extensions, vec!["mp3".to_string()]);
    assert!(!s.admin.is_operator(0));
    assert!(!s.admin.is_operator(1918624551));
}

#[test]
fn validate_rejects_zero_timeouts_workers_and_empty_extensions() {
    let mut s = Settings::default();
    s.store.lock_timeout_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.store.io_timeout_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.runtime.workers = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ingest.extensions = vec![" ".into(), ".".into()];
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[store]
path = "/var/lib/squonk/songs.json"
lock_timeout_ms = 150
io_timeout_ms = 900

[admin]
operator_id = 1918624551

[ingest]
extensions = ["mp3", "ogg"]
recursive = false
include_hidden = true
follow_links = false

[runtime]
workers = 2
welcome_text = "hello"
play_caption = "now playing"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SQUONK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SQUONK__STORE__LOCK_TIMEOUT_MS");
    let _g3 = EnvGuard::remove("SQUONK__ADMIN__OPERATOR_ID");

    let s = Settings::load().unwrap();
    assert_eq!(
        s.store.path,
        std::path::PathBuf::from("/var/lib/squonk/songs.json")
    );
    assert_eq!(s.store.lock_timeout(), std::time::Duration::from_millis(150));
    assert_eq!(s.store.io_timeout(), std::time::Duration::from_millis(900));
    assert!(s.admin.is_operator(1918624551));
    assert!(!s.admin.is_operator(42));
    assert_eq!(s.ingest.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert!(!s.ingest.recursive);
    assert!(s.ingest.include_hidden);
    assert!(!s.ingest.follow_links);
    assert_eq!(s.runtime.workers, 2);
    assert_eq!(s.runtime.welcome_text, "hello");
    assert_eq!(s.runtime.play_caption, "now playing");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[store]
lock_timeout_ms = 250

[admin]
operator_id = 7
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SQUONK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SQUONK__STORE__LOCK_TIMEOUT_MS", "40");
    let _g3 = EnvGuard::set("SQUONK__ADMIN__OPERATOR_ID", "99");

    let s = Settings::load().unwrap();
    assert_eq!(s.store.lock_timeout_ms, 40);
    assert!(s.admin.is_operator(99));
    assert!(!s.admin.is_operator(7));
}
