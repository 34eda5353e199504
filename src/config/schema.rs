use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/setlist/config.toml` or `~/.config/setlist/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SETLIST__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub playlist: PlaylistSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the key binding footer is rendered.
    pub show_controls: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ pick, order, save ~ ".to_string(),
            show_controls: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, dot optional).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Root folder to start with. Relative playlist paths are anchored here.
    pub root_folder: Option<PathBuf>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "m4a".into(),
                "aac".into(),
                "ogg".into(),
            ],
            follow_links: false,
            include_hidden: true,
            max_depth: None,
            root_folder: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Extension appended to a destination path that has none.
    pub extension: String,
    /// Name pre-filled in the playlist name prompt.
    pub default_name: String,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            extension: "m3u8".to_string(),
            default_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for log files. Defaults to the XDG state directory.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}
