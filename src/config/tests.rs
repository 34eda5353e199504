use super::load::{InvalidSetting, default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
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
fn resolve_config_path_prefers_setlist_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SETLIST_CONFIG_PATH", "/tmp/setlist-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/setlist-test-config.toml")
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
            .join("setlist")
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
            .join("setlist")
            .join("config.toml")
    );
}

#[test]
fn default_state_dir_falls_back_to_home_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/setlist")
    );
}

#[test]
fn defaults_recognize_the_six_audio_extensions() {
    let s = Settings::default();
    assert_eq!(
        s.library.extensions,
        vec!["mp3", "flac", "wav", "m4a", "aac", "ogg"]
    );
    assert!(!s.library.follow_links);
    assert!(s.library.include_hidden);
    assert!(s.library.root_folder.is_none());
    assert_eq!(s.playlist.extension, "m3u8");
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_empty_extension_lists() {
    let mut s = Settings::default();
    s.library.extensions = vec![" ".into(), ".".into()];
    assert_eq!(s.validate(), Err(InvalidSetting::NoLibraryExtensions));

    let mut s = Settings::default();
    s.playlist.extension = String::new();
    assert_eq!(s.validate(), Err(InvalidSetting::EmptyPlaylistExtension));
    assert_eq!(
        InvalidSetting::EmptyPlaylistExtension.key(),
        "playlist.extension"
    );
}

#[test]
fn reset_restores_only_the_offending_value() {
    let mut s = Settings::default();
    s.library.extensions = vec![];
    s.library.max_depth = Some(2);
    InvalidSetting::NoLibraryExtensions.reset(&mut s);
    assert_eq!(s.library.extensions, LibrarySettings::default().extensions);
    assert_eq!(s.library.max_depth, Some(2));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[ui]
header_text = "hello"
show_controls = false

[library]
extensions = ["mp3", ".opus"]
follow_links = true
include_hidden = false
max_depth = 3
root_folder = "/music"

[playlist]
extension = "m3u"
default_name = "road trip"

[logging]
level = "debug"
dir = "/tmp/setlist-logs"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SETLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SETLIST__PLAYLIST__EXTENSION");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_controls);
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), ".opus".to_string()]);
    assert!(s.library.follow_links);
    assert!(!s.library.include_hidden);
    assert_eq!(s.library.max_depth, Some(3));
    assert_eq!(
        s.library.root_folder,
        Some(std::path::PathBuf::from("/music"))
    );
    assert_eq!(s.playlist.extension, "m3u");
    assert_eq!(s.playlist.default_name, "road trip");
    assert_eq!(s.logging.level, "debug");
    assert_eq!(
        s.logging.dir,
        Some(std::path::PathBuf::from("/tmp/setlist-logs"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playlist]
extension = "m3u8"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SETLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SETLIST__PLAYLIST__EXTENSION", "m3u");

    let s = Settings::load().unwrap();
    assert_eq!(s.playlist.extension, "m3u");
}
