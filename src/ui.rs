//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Dialog, DialogLevel, Pane, Prompt, PromptKind};
use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("o", "root folder");
    map.insert("s", "scan");
    map.insert("/", "filter");
    map.insert("tab", "switch list");
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("space", "mark");
    map.insert("enter/a", "add");
    map.insert("d", "remove");
    map.insert("K/J", "move up/down");
    map.insert("m", "grab/drop");
    map.insert("C", "clear");
    map.insert("w", "save");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "o", "s", "/", "tab", "j/k", "gg/G", "space", "enter/a", "d", "K/J", "m", "C", "w", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Pick the slice of a `total`-row list to render so the selection stays
/// roughly centered. Returns `(start, end, selected_pos_in_visible)`.
fn visible_window(total: usize, height: usize, sel_pos: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, sel_pos);
    }
    let half = height / 2;
    let mut start = sel_pos.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, sel_pos - start)
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    match &app.root_folder {
        Some(root) => parts.push(format!(" Root Music Folder: {}", root.display())),
        None => parts.push(" Root Music Folder: (none)".to_string()),
    }

    if let Some(dir) = &app.last_scan_dir {
        if app.root_folder.as_deref() != Some(dir.as_path()) {
            parts.push(format!("Scanned: {}", dir.display()));
        }
    }

    let q = app.filter_query.trim();
    if app.filter_mode || !q.is_empty() {
        let mut filter_part = String::from("FILTER:");
        if !q.is_empty() {
            filter_part.push(' ');
            filter_part.push_str(q);
        }
        parts.push(filter_part);
    }

    parts.join(" • ")
}

fn draw_library(frame: &mut Frame, area: Rect, app: &App, display: &[usize]) {
    // Only build ListItems for the visible window.
    let total = display.len();
    let height = area.height.saturating_sub(2) as usize;
    let sel_pos = display
        .iter()
        .position(|&i| i == app.library_selected)
        .unwrap_or(0);
    let (start, end, selected_in_visible) = visible_window(total, height, sel_pos);

    let items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| {
            let mark = if app.marked.contains(&i) { "* " } else { "  " };
            ListItem::new(format!("{mark}{}", app.library.entries()[i]))
        })
        .collect();

    let title = if total == app.library.len() {
        format!(" library ({}) ", total)
    } else {
        format!(" library ({}/{}) ", total, app.library.len())
    };
    let list = List::new(items)
        .block(pane_block(title, app.focus == Pane::Library))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_playlist(frame: &mut Frame, area: Rect, app: &App) {
    let entries = app.playlist.entries();
    let total = entries.len();
    let height = area.height.saturating_sub(2) as usize;
    let sel_pos = app.playlist_selected.unwrap_or(0);
    let (start, end, selected_in_visible) = visible_window(total, height, sel_pos);

    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let i = start + offset;
            if app.grabbed == Some(i) {
                ListItem::new(format!("≡ {entry}")).style(Style::default().fg(Color::Yellow))
            } else {
                ListItem::new(format!("  {entry}"))
            }
        })
        .collect();

    let title = if app.grabbed.is_some() {
        format!(" playlist ({}) • moving: m/enter drops, esc cancels ", total)
    } else {
        format!(" playlist ({}) ", total)
    };
    let list = List::new(items)
        .block(pane_block(title, app.focus == Pane::Playlist))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if app.playlist_selected.is_some() && total > 0 {
        state.select(Some(selected_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt, pending_name: Option<&str>) {
    let popup_area = centered_rect_sized(80, 5, area);
    frame.render_widget(Clear, popup_area);

    let title = match (prompt.kind, pending_name) {
        (PromptKind::Destination, Some(name)) => format!(" {} ({}) ", prompt.kind.title(), name),
        _ => format!(" {} ", prompt.kind.title()),
    };
    let body = format!("{}▏\nenter confirms • esc cancels", prompt.input);
    let paragraph = Paragraph::new(body)
        .block(
            Block::default()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .borders(Borders::ALL)
                .title(title),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

fn draw_dialog(frame: &mut Frame, area: Rect, dialog: &Dialog) {
    let popup_area = centered_rect_sized(60, 6, area);
    frame.render_widget(Clear, popup_area);

    let color = match dialog.level {
        DialogLevel::Info => Color::Cyan,
        DialogLevel::Warning => Color::Yellow,
        DialogLevel::Error => Color::Red,
    };
    let paragraph = Paragraph::new(format!("{}\n\npress any key", dialog.message))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", dialog.title)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, display: &[usize], ui_settings: &UiSettings) {
    let footer_height = if ui_settings.show_controls { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(footer_height),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" setlist ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(status_text(app))
        .block(Block::bordered().title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_library(frame, panes[0], app, display);
    draw_playlist(frame, panes[1], app);

    if ui_settings.show_controls {
        let footer = Paragraph::new(controls_text())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" controls ")
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, chunks[3]);
    }

    // Overlays keep the lists visible under them.
    if let Some(prompt) = &app.prompt {
        draw_prompt(frame, chunks[2], prompt, app.pending_name());
    }
    if let Some(dialog) = &app.dialog {
        draw_dialog(frame, chunks[2], dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_window_keeps_selection_centered() {
        assert_eq!(visible_window(5, 10, 3), (0, 5, 3));
        assert_eq!(visible_window(100, 10, 0), (0, 10, 0));
        assert_eq!(visible_window(100, 10, 50), (45, 55, 5));
        assert_eq!(visible_window(100, 10, 99), (90, 100, 9));
    }

    #[test]
    fn controls_text_lists_every_binding() {
        let text = controls_text();
        assert_eq!(text.matches('[').count(), CONTROLS_MAP.len());
        assert!(text.starts_with("[o] root folder"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn status_text_shows_root_and_filter() {
        let mut app = App::new(&crate::config::Settings::default());
        assert_eq!(status_text(&app), " Root Music Folder: (none)");

        app.set_root_folder(std::path::PathBuf::from("/music"));
        app.filter_query = "abc".into();
        assert_eq!(
            status_text(&app),
            format!(
                " Root Music Folder: {} • FILTER: abc",
                std::path::Path::new("/music").display()
            )
        );
    }
}
