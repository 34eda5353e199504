use std::{env, path::PathBuf};

use super::schema::{LibrarySettings, PlaylistSettings, Settings};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `SETLIST__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SETLIST")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        let has_extension = self
            .library
            .extensions
            .iter()
            .any(|e| !e.trim().trim_start_matches('.').is_empty());
        if !has_extension {
            return Err(InvalidSetting::NoLibraryExtensions);
        }
        if self.playlist.extension.trim().trim_start_matches('.').is_empty() {
            return Err(InvalidSetting::EmptyPlaylistExtension);
        }
        Ok(())
    }
}

/// A loaded value that cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSetting {
    #[error("library.extensions must name at least one extension")]
    NoLibraryExtensions,
    #[error("playlist.extension must not be empty")]
    EmptyPlaylistExtension,
}

impl InvalidSetting {
    /// Dotted key of the offending value.
    pub fn key(self) -> &'static str {
        match self {
            InvalidSetting::NoLibraryExtensions => "library.extensions",
            InvalidSetting::EmptyPlaylistExtension => "playlist.extension",
        }
    }

    /// Put the offending value back to its default.
    pub fn reset(self, settings: &mut Settings) {
        match self {
            InvalidSetting::NoLibraryExtensions => {
                settings.library.extensions = LibrarySettings::default().extensions;
            }
            InvalidSetting::EmptyPlaylistExtension => {
                settings.playlist.extension = PlaylistSettings::default().extension;
            }
        }
    }
}

/// Resolve the config path from `SETLIST_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SETLIST_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/setlist/config.toml`
/// or `~/.config/setlist/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("setlist").join("config.toml"))
}

/// Compute the default log directory under `$XDG_STATE_HOME/setlist`
/// or `~/.local/state/setlist`.
pub fn default_state_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("setlist"))
}
