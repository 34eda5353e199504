//! Extended M3U serialization.
//!
//! Playlist entries are stored relative to the root folder. When the
//! playlist file lands somewhere else, each entry is re-expressed relative
//! to the playlist's own directory so the file stays playable from there.

use std::{
    fs,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use tracing::{info, warn};

pub const HEADER: &str = "#EXTM3U";
/// Track info line. Duration and title are never filled in.
pub const EXTINF: &str = "#EXTINF:,";

/// Errors raised while saving a playlist.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Playlist is empty.")]
    Empty,
    #[error("{path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("{path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Make `path` absolute against the working directory and fold `.`/`..` lexically.
fn absolute(path: &Path) -> Option<PathBuf> {
    let path = std::path::absolute(path).ok()?;
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

/// Compare directories by their resolved location, falling back to the
/// lexical absolute form when a path cannot be canonicalized.
fn same_dir(a: &Path, b: &Path) -> bool {
    let resolve = |p: &Path| fs::canonicalize(p).ok().or_else(|| absolute(p));
    match (resolve(a), resolve(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Express `target` relative to the directory `base`, using `..` as needed.
///
/// Returns `None` when the two paths share no common root, e.g. different
/// drive prefixes.
pub fn relative_to(target: &Path, base: &Path) -> Option<PathBuf> {
    let target = absolute(target)?;
    let base = absolute(base)?;
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();

    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(t, b)| t == b)
        .count();
    if common == 0 {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

/// Resolve the line written for one playlist entry.
///
/// With no root, or with the playlist saved directly in the root, the entry
/// is written as stored. Otherwise it is rewritten relative to `out_dir`,
/// keeping the stored form if that is not computable.
pub fn entry_line(entry: &str, root: Option<&Path>, out_dir: &Path) -> String {
    let Some(root) = root else {
        return entry.to_string();
    };
    if same_dir(out_dir, root) {
        return entry.to_string();
    }

    match relative_to(&root.join(entry), out_dir) {
        Some(rel) => rel.to_string_lossy().into_owned(),
        None => {
            warn!("cannot relativize {entry} to {}; writing it unchanged", out_dir.display());
            entry.to_string()
        }
    }
}

/// Render the full playlist text for a file living in `out_dir`.
pub fn render(entries: &[String], root: Option<&Path>, out_dir: &Path) -> String {
    let mut content = String::from(HEADER);
    content.push('\n');
    for entry in entries {
        content.push_str(EXTINF);
        content.push('\n');
        content.push_str(&entry_line(entry, root, out_dir));
        content.push('\n');
    }
    content
}

/// Write `entries` to `path` as UTF-8 extended M3U.
///
/// An empty playlist is refused before anything touches the filesystem. A
/// failed write is not cleaned up.
pub fn write_playlist(path: &Path, entries: &[String], root: Option<&Path>) -> Result<(), SaveError> {
    if entries.is_empty() {
        return Err(SaveError::Empty);
    }

    let out_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let content = render(entries, root, out_dir);

    let mut file = fs::File::create(path).map_err(|source| SaveError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| SaveError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!("saved {} entries to {}", entries.len(), path.display());
    Ok(())
}
