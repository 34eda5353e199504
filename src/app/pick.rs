//! Path handling for the folder and destination prompts.

use std::{
    env,
    path::{Path, PathBuf},
};

/// A prompt answer that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("{} is not a folder.", .0.display())]
    NotADirectory(PathBuf),
}

pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~` to the home directory. Other input is taken as is.
pub fn expand_path(input: &str) -> PathBuf {
    let input = input.trim();
    if input == "~" {
        return home_dir();
    }
    match input.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(input),
    }
}

/// Resolve a typed folder. Blank input means the picker was cancelled.
pub fn pick_dir(input: &str) -> Option<Result<PathBuf, PickError>> {
    if input.trim().is_empty() {
        return None;
    }
    let path = expand_path(input);
    if !path.is_dir() {
        return Some(Err(PickError::NotADirectory(path)));
    }
    Some(Ok(std::path::absolute(&path).unwrap_or(path)))
}

/// Where the destination prompt starts: `<root or home>/<name>.<ext>`.
pub fn default_destination(root: Option<&Path>, name: &str, extension: &str) -> PathBuf {
    let dir = root.map(Path::to_path_buf).unwrap_or_else(home_dir);
    dir.join(format!("{name}.{}", extension.trim_start_matches('.')))
}

/// Append `extension` when `path` has none.
pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension.trim_start_matches('.'))
    }
}
