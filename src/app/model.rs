//! Application model types: `App`, prompts and dialogs.
//!
//! The `App` struct owns the root folder, the scanned library and the
//! playlist being built, plus the cursor, prompt and dialog state the UI
//! renders. Every user action maps to exactly one method here.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::{LibrarySettings, PlaylistSettings, Settings};
use crate::library::{Library, scan};
use crate::playlist::{Playlist, SaveError, write_playlist};

use super::pick::{default_destination, expand_path, pick_dir, with_default_extension};

/// Which list receives cursor keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Library,
    Playlist,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DialogLevel {
    Info,
    Warning,
    Error,
}

/// A modal notification. Any key dismisses it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialog {
    pub level: DialogLevel,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn new(level: DialogLevel, title: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// What a line prompt is asking for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    RootFolder,
    ScanFolder,
    PlaylistName,
    Destination,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::RootFolder => "Select Root Music Folder",
            PromptKind::ScanFolder => "Select Folder to Scan",
            PromptKind::PlaylistName => "Playlist name (no extension)",
            PromptKind::Destination => "Save playlist as",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// The main application model.
pub struct App {
    pub root_folder: Option<PathBuf>,
    pub library: Library,
    pub playlist: Playlist,

    /// Library index under the cursor.
    pub library_selected: usize,
    /// Library indices marked for adding.
    pub marked: BTreeSet<usize>,
    pub playlist_selected: Option<usize>,
    /// Playlist index picked up for a drag, if any.
    pub grabbed: Option<usize>,

    pub focus: Pane,
    pub filter_mode: bool,
    pub filter_query: String,

    pub prompt: Option<Prompt>,
    pub dialog: Option<Dialog>,
    pub last_scan_dir: Option<PathBuf>,

    pending_name: Option<String>,
    library_settings: LibrarySettings,
    playlist_settings: PlaylistSettings,
}

impl App {
    /// Create an empty `App` configured from `settings`.
    ///
    /// A configured `library.root_folder` goes through the same checks as the
    /// root folder prompt, so `~` is expanded and non-folders are reported.
    pub fn new(settings: &Settings) -> Self {
        let mut app = Self {
            root_folder: None,
            library: Library::default(),
            playlist: Playlist::new(),

            library_selected: 0,
            marked: BTreeSet::new(),
            playlist_selected: None,
            grabbed: None,

            focus: Pane::Library,
            filter_mode: false,
            filter_query: String::new(),

            prompt: None,
            dialog: None,
            last_scan_dir: None,

            pending_name: None,
            library_settings: settings.library.clone(),
            playlist_settings: settings.playlist.clone(),
        };
        if let Some(root) = &settings.library.root_folder {
            app.choose_root_from(&root.to_string_lossy());
        }
        app
    }

    /// Return the library indices visible under the current filter.
    pub fn display_indices(&self) -> Vec<usize> {
        self.library.filter(&self.filter_query)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Library => Pane::Playlist,
            Pane::Playlist => Pane::Library,
        };
    }

    // -- root folder and scanning --------------------------------------------

    /// Open the root folder prompt, pre-filled with the current root.
    pub fn request_root_folder(&mut self) {
        let input = self
            .root_folder
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/".to_string());
        self.open_prompt(PromptKind::RootFolder, input);
    }

    pub fn set_root_folder(&mut self, path: PathBuf) {
        info!("root folder set to {}", path.display());
        self.root_folder = Some(path);
    }

    /// Use `input` as the root folder when it names an existing directory.
    /// Blank input leaves everything as it was.
    pub fn choose_root_from(&mut self, input: &str) {
        match pick_dir(input) {
            Some(Ok(dir)) => self.set_root_folder(dir),
            Some(Err(err)) => self.not_a_folder(err.to_string()),
            None => {}
        }
    }

    /// Scan the root folder, or ask for a folder when no root is set.
    pub fn request_scan(&mut self) {
        match self.root_folder.clone() {
            Some(root) => self.scan_folder(&root),
            None => {
                let input = self
                    .last_scan_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "~/".to_string());
                self.open_prompt(PromptKind::ScanFolder, input);
            }
        }
    }

    /// Replace the library with the audio files found under `start`.
    pub fn scan_folder(&mut self, start: &Path) {
        self.library = scan(start, self.root_folder.as_deref(), &self.library_settings);
        self.last_scan_dir = Some(start.to_path_buf());
        self.marked.clear();
        self.library_selected = 0;
        self.ensure_selected_visible();

        self.dialog = Some(Dialog::new(
            DialogLevel::Info,
            "Scan Complete",
            format!("Found {} audio files.", self.library.len()),
        ));
    }

    // -- filtering -----------------------------------------------------------

    /// Enter filter mode and move focus to the library.
    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.focus = Pane::Library;
        self.ensure_selected_visible();
    }
    /// Leave filter mode, keeping the current query.
    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }
    /// Clear the active filter and restore selection visibility.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.filter_changed();
    }
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.filter_changed();
    }
    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.filter_changed();
    }

    // Marks belong to the previous view.
    fn filter_changed(&mut self) {
        self.marked.clear();
        self.ensure_selected_visible();
    }

    /// Ensure that `library_selected` is part of the filtered view,
    /// otherwise move it to the first visible entry.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.library_selected = 0;
            return;
        }

        if !display.contains(&self.library_selected) {
            self.library_selected = display[0];
        }
    }

    // -- cursor movement -----------------------------------------------------

    /// Move the cursor of the focused pane one row down.
    pub fn next(&mut self) {
        match self.focus {
            Pane::Library => {
                let display = self.display_indices();
                if let Some(p) = display.iter().position(|&i| i == self.library_selected) {
                    if let Some(&next) = display.get(p + 1) {
                        self.library_selected = next;
                    }
                }
            }
            Pane::Playlist => {
                if let Some(sel) = self.playlist_selected {
                    if sel + 1 < self.playlist.len() {
                        self.playlist_selected = Some(sel + 1);
                    }
                }
            }
        }
    }

    /// Move the cursor of the focused pane one row up.
    pub fn prev(&mut self) {
        match self.focus {
            Pane::Library => {
                let display = self.display_indices();
                if let Some(p) = display.iter().position(|&i| i == self.library_selected) {
                    if p > 0 {
                        self.library_selected = display[p - 1];
                    }
                }
            }
            Pane::Playlist => {
                if let Some(sel) = self.playlist_selected {
                    self.playlist_selected = Some(sel.saturating_sub(1));
                }
            }
        }
    }

    pub fn select_first(&mut self) {
        match self.focus {
            Pane::Library => {
                if let Some(&first) = self.display_indices().first() {
                    self.library_selected = first;
                }
            }
            Pane::Playlist => {
                if !self.playlist.is_empty() {
                    self.playlist_selected = Some(0);
                }
            }
        }
    }

    pub fn select_last(&mut self) {
        match self.focus {
            Pane::Library => {
                if let Some(&last) = self.display_indices().last() {
                    self.library_selected = last;
                }
            }
            Pane::Playlist => {
                if !self.playlist.is_empty() {
                    self.playlist_selected = Some(self.playlist.len() - 1);
                }
            }
        }
    }

    // -- playlist editing ----------------------------------------------------

    /// Mark or unmark the library entry under the cursor.
    pub fn toggle_mark(&mut self) {
        if !self.display_indices().contains(&self.library_selected) {
            return;
        }
        if !self.marked.remove(&self.library_selected) {
            self.marked.insert(self.library_selected);
        }
    }

    /// Append the marked library entries (or the one under the cursor when
    /// nothing is marked) to the playlist, in view order.
    pub fn add_selected(&mut self) {
        let display = self.display_indices();
        let picked: Vec<usize> = if self.marked.is_empty() {
            display
                .iter()
                .copied()
                .filter(|&i| i == self.library_selected)
                .collect()
        } else {
            display
                .iter()
                .copied()
                .filter(|i| self.marked.contains(i))
                .collect()
        };
        if picked.is_empty() {
            return;
        }

        let items: Vec<&str> = picked.iter().filter_map(|&i| self.library.get(i)).collect();
        self.playlist.add(items);
        self.marked.clear();
        if self.playlist_selected.is_none() {
            self.playlist_selected = Some(0);
        }
    }

    /// Remove the selected playlist entry. No-op without a selection.
    pub fn remove_selected(&mut self) {
        let Some(sel) = self.playlist_selected else {
            return;
        };
        self.playlist.remove(sel);
        self.grabbed = None;
        self.playlist_selected = if self.playlist.is_empty() {
            None
        } else {
            Some(sel.min(self.playlist.len() - 1))
        };
    }

    pub fn move_selected_up(&mut self) {
        if let Some(sel) = self.playlist_selected {
            if let Some(new) = self.playlist.move_up(sel) {
                self.playlist_selected = Some(new);
                self.follow_swap(sel, new);
            }
        }
    }

    pub fn move_selected_down(&mut self) {
        if let Some(sel) = self.playlist_selected {
            if let Some(new) = self.playlist.move_down(sel) {
                self.playlist_selected = Some(new);
                self.follow_swap(sel, new);
            }
        }
    }

    /// Keep a grabbed entry attached to its row after rows `a` and `b` swap.
    fn follow_swap(&mut self, a: usize, b: usize) {
        self.grabbed = match self.grabbed {
            Some(g) if g == a => Some(b),
            Some(g) if g == b => Some(a),
            other => other,
        };
    }

    pub fn clear_playlist(&mut self) {
        self.playlist.clear();
        self.playlist_selected = None;
        self.grabbed = None;
    }

    /// Pick up the selected entry, or drop the held one at the cursor.
    pub fn grab_or_drop(&mut self) {
        match (self.grabbed.take(), self.playlist_selected) {
            (Some(from), Some(to)) => {
                if let Some(at) = self.playlist.move_to(from, to) {
                    self.playlist_selected = Some(at);
                }
            }
            (None, Some(sel)) => self.grabbed = Some(sel),
            _ => {}
        }
    }

    pub fn cancel_grab(&mut self) {
        self.grabbed = None;
    }

    // -- saving --------------------------------------------------------------

    /// Start the save flow: refuse an empty playlist, else ask for a name.
    pub fn request_save(&mut self) {
        if self.playlist.is_empty() {
            self.dialog = Some(Dialog::new(
                DialogLevel::Warning,
                "Nothing to save",
                SaveError::Empty.to_string(),
            ));
            return;
        }
        let name = self.playlist_settings.default_name.clone();
        self.open_prompt(PromptKind::PlaylistName, name);
    }

    /// Write the playlist to `path` and report the outcome in a dialog.
    pub fn save_to(&mut self, path: &Path) {
        let result = write_playlist(path, self.playlist.entries(), self.root_folder.as_deref());
        self.dialog = Some(match result {
            Ok(()) => Dialog::new(
                DialogLevel::Info,
                "Saved",
                format!("Playlist saved to {}", path.display()),
            ),
            Err(SaveError::Empty) => Dialog::new(
                DialogLevel::Warning,
                "Nothing to save",
                SaveError::Empty.to_string(),
            ),
            Err(err) => {
                error!("save failed: {err}");
                Dialog::new(
                    DialogLevel::Error,
                    "Save failed",
                    format!("Could not save playlist: {err}"),
                )
            }
        });
    }

    // -- prompts and dialogs -------------------------------------------------

    fn open_prompt(&mut self, kind: PromptKind, input: String) {
        self.prompt = Some(Prompt { kind, input });
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.pop();
        }
    }

    /// Abandon the current prompt and whatever flow it belonged to.
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.pending_name = None;
    }

    /// Act on the current prompt's answer. Blank answers cancel silently.
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };

        match prompt.kind {
            PromptKind::RootFolder => self.choose_root_from(&prompt.input),
            PromptKind::ScanFolder => match pick_dir(&prompt.input) {
                Some(Ok(dir)) => self.scan_folder(&dir),
                Some(Err(err)) => self.not_a_folder(err.to_string()),
                None => {}
            },
            PromptKind::PlaylistName => {
                let name = prompt.input.trim();
                if name.is_empty() {
                    return;
                }
                let dest = default_destination(
                    self.root_folder.as_deref(),
                    name,
                    &self.playlist_settings.extension,
                );
                self.pending_name = Some(name.to_string());
                self.open_prompt(PromptKind::Destination, dest.display().to_string());
            }
            PromptKind::Destination => {
                self.pending_name = None;
                if prompt.input.trim().is_empty() {
                    return;
                }
                let path = with_default_extension(
                    expand_path(&prompt.input),
                    &self.playlist_settings.extension,
                );
                let path = std::path::absolute(&path).unwrap_or(path);
                self.save_to(&path);
            }
        }
    }

    /// Name entered in the first step of an unfinished save flow.
    pub fn pending_name(&self) -> Option<&str> {
        self.pending_name.as_deref()
    }

    fn not_a_folder(&mut self, message: String) {
        self.dialog = Some(Dialog::new(DialogLevel::Warning, "Not a folder", message));
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }
}
