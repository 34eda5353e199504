use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Pane};
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { pending_gg: false }
    }
}

/// Main terminal event loop: draw, wait for one input event, handle it.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, &settings.ui))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key_event(key, app, state) {
                break;
            }
        }
    }

    Ok(())
}

/// Apply one key press to `app`. Returns true when the app should exit.
fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    if app.dialog.is_some() {
        app.dismiss_dialog();
        return false;
    }

    if app.prompt.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Enter => app.submit_prompt(),
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return false;
    }

    if app.filter_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.clear_filter(),
            KeyCode::Enter => app.exit_filter_mode(),
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Down => app.next(),
            KeyCode::Up => app.prev(),
            KeyCode::Char('j') | KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.next();
            }
            KeyCode::Char('k') | KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.prev();
            }
            KeyCode::Char(c) if !c.is_control() => app.push_filter_char(c),
            _ => {}
        }
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('o') => app.request_root_folder(),
        KeyCode::Char('s') => app.request_scan(),
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Char('w') => app.request_save(),
        KeyCode::Char('C') => app.clear_playlist(),
        KeyCode::Esc => {
            if app.grabbed.is_some() {
                app.cancel_grab();
            } else if !app.filter_query.is_empty() {
                app.clear_filter();
            }
        }
        _ => match app.focus {
            Pane::Library => handle_library_key(key.code, app),
            Pane::Playlist => handle_playlist_key(key.code, app),
        },
    }

    false
}

fn handle_library_key(code: KeyCode, app: &mut App) {
    match code {
        KeyCode::Char(' ') => {
            app.toggle_mark();
            app.next();
        }
        KeyCode::Enter | KeyCode::Char('a') => app.add_selected(),
        _ => {}
    }
}

fn handle_playlist_key(code: KeyCode, app: &mut App) {
    match code {
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('K') => app.move_selected_up(),
        KeyCode::Char('J') => app.move_selected_down(),
        KeyCode::Char('m') => app.grab_or_drop(),
        KeyCode::Enter if app.grabbed.is_some() => app.grab_or_drop(),
        _ => {}
    }
}
