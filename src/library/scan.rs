use std::path::Path;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Library;

/// Lowercased `.ext` suffixes for the configured extensions.
fn audio_suffixes(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .collect()
}

/// Match on the whole file name so that a bare `.mp3` counts too.
fn is_audio_file(path: &Path, suffixes: &[String]) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| {
            let name = name.to_lowercase();
            suffixes.iter().any(|s| name.ends_with(s.as_str()))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Path of `path` relative to `root` when it lies inside it, else relative to `start`.
fn relative_entry(path: &Path, start: &Path, root: Option<&Path>) -> Option<String> {
    root.and_then(|r| path.strip_prefix(r).ok())
        .or_else(|| path.strip_prefix(start).ok())
        .map(|rel| rel.to_string_lossy().into_owned())
}

/// Walk `start` recursively and collect every audio file as a relative path.
///
/// Entries are relative to `root` when it is set and contains the file,
/// otherwise relative to `start`. The result is sorted case-insensitively.
pub fn scan(start: &Path, root: Option<&Path>, settings: &LibrarySettings) -> Library {
    let suffixes = audio_suffixes(settings);
    let mut found: Vec<String> = Vec::new();

    let mut walker = WalkDir::new(start).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, &suffixes) {
            continue;
        }

        match relative_entry(path, start, root) {
            Some(rel) => found.push(rel),
            None => warn!("skipping {} outside the scanned folder", path.display()),
        }
    }

    info!("scanned {}: {} audio files", start.display(), found.len());
    Library::from_paths(found)
}
