//! Event handling for the console
//!
//! Maps keyboard and mouse events to [`Action`]s for the app loop. Cursor
//! movement and prompt editing are applied to [`UiState`] directly; all
//! else is left to the app, which owns the [`Console`](crate::console::Console).

use super::state::{FocusPane, InputPurpose, Mode, UiState};
use crate::draft::{ViewMode, VisualMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Rows the editor body scrolls per page key
const BODY_PAGE: u16 = 10;

/// Key reference shown in the help overlay: section, key, description
pub const BINDINGS: &[(&str, &str, &str)] = &[
    ("Navigation", "↑/↓ j/k", "Move in the list, or scroll the editor"),
    ("Navigation", "PgUp/PgDn", "Page up/down"),
    ("Navigation", "Home/End", "Jump to start/end"),
    ("Navigation", "Enter", "Open the version under the cursor"),
    ("Navigation", "Tab", "Switch between list and editor"),
    ("Navigation", "/", "Search by name or description"),
    ("Navigation", "r", "Reload the list"),
    ("Versions", "n", "New version"),
    ("Versions", "e", "Edit the open version"),
    ("Versions", "N / I", "Change name / description"),
    ("Versions", "u", "Upload a file as the source"),
    ("Versions", "Ctrl-e", "Edit the source in $EDITOR"),
    ("Versions", "Ctrl-s", "Save"),
    ("Versions", "Esc", "Discard edits"),
    ("Versions", "d", "Delete the open version"),
    ("Versions", "D", "Download as {name}.zip"),
    ("Views", "v", "Generate visualizations"),
    ("Views", "1 / 2 / 3", "Source / visual / compare view"),
    ("Views", "g / t / b", "Graph / tree / table visual"),
    ("Views", "o", "Open the graph in a browser"),
    ("Views", "y", "Copy the source to the clipboard"),
    ("Views", "f", "Toggle fullscreen editor"),
    ("Other", "? / F1", "This help"),
    ("Other", "q", "Quit"),
];

/// What the app should do after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Redraw only
    Continue,
    /// No binding for the event
    Ignored,
    Quit,
    /// The list cursor moved
    CursorMoved,
    /// Open the version under the cursor
    Open,
    /// Open a prompt; the app fills in the current value
    Prompt(InputPurpose),
    /// A prompt was submitted
    Submit(InputPurpose, String),
    New,
    Edit,
    Save,
    Cancel,
    Delete,
    ConfirmDelete,
    CancelDelete,
    DismissAlert,
    Validate,
    ExternalEditor,
    SetViewMode(ViewMode),
    SetVisualMode(VisualMode),
    ToggleFullscreen,
    Refresh,
    Download,
    OpenGraph,
    CopySource,
}

/// Handle a key press in the given effective mode
///
/// `list_len` is the number of rows in the version list.
pub fn handle_key(state: &mut UiState, mode: Mode, key: KeyEvent, list_len: usize) -> Action {
    match mode {
        Mode::Normal => handle_normal_mode(state, key, list_len),
        Mode::Help => {
            // Any key closes help
            state.back_to_normal();
            Action::Continue
        }
        Mode::Input => handle_input_mode(state, key),
        Mode::Confirm => match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::ConfirmDelete,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::CancelDelete,
            _ => Action::Ignored,
        },
        Mode::Alert => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Action::DismissAlert,
            _ => Action::Ignored,
        },
    }
}

fn handle_normal_mode(state: &mut UiState, key: KeyEvent, list_len: usize) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('s') => Action::Save,
            KeyCode::Char('e') => Action::ExternalEditor,
            _ => Action::Ignored,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => move_up(state, 1),
        KeyCode::Down | KeyCode::Char('j') => move_down(state, 1, list_len),
        KeyCode::PageUp => move_up(state, BODY_PAGE),
        KeyCode::PageDown => move_down(state, BODY_PAGE, list_len),
        KeyCode::Home if state.focus == FocusPane::List => {
            state.jump_to_start();
            Action::CursorMoved
        }
        KeyCode::End if state.focus == FocusPane::List => {
            state.jump_to_end(list_len);
            Action::CursorMoved
        }
        KeyCode::Home => {
            state.body_scroll = 0;
            Action::Continue
        }
        KeyCode::Enter if state.focus == FocusPane::List && list_len > 0 => Action::Open,
        KeyCode::Tab => {
            state.toggle_focus();
            Action::Continue
        }
        KeyCode::F(1) | KeyCode::Char('?') => {
            state.show_help();
            Action::Continue
        }
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('/') => Action::Prompt(InputPurpose::Search),
        KeyCode::Char('N') => Action::Prompt(InputPurpose::Name),
        KeyCode::Char('I') => Action::Prompt(InputPurpose::Description),
        KeyCode::Char('u') => Action::Prompt(InputPurpose::Upload),
        KeyCode::Char('n') => Action::New,
        KeyCode::Char('e') => Action::Edit,
        KeyCode::Char('d') => Action::Delete,
        KeyCode::Char('D') => Action::Download,
        KeyCode::Char('v') => Action::Validate,
        KeyCode::Char('1') => Action::SetViewMode(ViewMode::Source),
        KeyCode::Char('2') => Action::SetViewMode(ViewMode::Visual),
        KeyCode::Char('3') => Action::SetViewMode(ViewMode::Compare),
        KeyCode::Char('g') => Action::SetVisualMode(VisualMode::Graph),
        KeyCode::Char('t') => Action::SetVisualMode(VisualMode::Tree),
        KeyCode::Char('b') => Action::SetVisualMode(VisualMode::Table),
        KeyCode::Char('f') => Action::ToggleFullscreen,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('o') => Action::OpenGraph,
        KeyCode::Char('y') => Action::CopySource,
        _ => Action::Ignored,
    }
}

fn move_up(state: &mut UiState, rows: u16) -> Action {
    match state.focus {
        FocusPane::List if rows == 1 => state.cursor_up(),
        FocusPane::List => state.page_up(),
        FocusPane::Editor => {
            state.scroll_body_up(rows);
            return Action::Continue;
        }
    }
    Action::CursorMoved
}

fn move_down(state: &mut UiState, rows: u16, list_len: usize) -> Action {
    match state.focus {
        FocusPane::List if rows == 1 => state.cursor_down(list_len),
        FocusPane::List => state.page_down(list_len),
        FocusPane::Editor => {
            state.scroll_body_down(rows);
            return Action::Continue;
        }
    }
    Action::CursorMoved
}

fn handle_input_mode(state: &mut UiState, key: KeyEvent) -> Action {
    if key.code == KeyCode::Enter {
        return state
            .close_input()
            .map_or(Action::Continue, |(purpose, text)| {
                Action::Submit(purpose, text)
            });
    }
    if key.code == KeyCode::Esc {
        state.back_to_normal();
        return Action::Continue;
    }

    let Some(input) = state.input_mut() else {
        return Action::Ignored;
    };
    match (key.code, key.modifiers) {
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => input.clear_line(),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => input.delete_word_backwards(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => input.insert_char(c),
        (KeyCode::Backspace, _) => input.backspace(),
        (KeyCode::Delete, _) => input.delete(),
        (KeyCode::Left, _) => input.cursor_left(),
        (KeyCode::Right, _) => input.cursor_right(),
        (KeyCode::Home, _) => input.cursor_home(),
        (KeyCode::End, _) => input.cursor_end(),
        (KeyCode::Tab, _) => input.accept_suggestion(),
        (KeyCode::Up, _) => input.suggestion_up(),
        (KeyCode::Down, _) => input.suggestion_down(),
        _ => return Action::Ignored,
    }
    Action::Continue
}

/// Handle mouse events
pub fn handle_mouse(state: &mut UiState, mode: Mode, mouse: MouseEvent, list_len: usize) -> Action {
    if mode != Mode::Normal {
        return Action::Ignored;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => move_up(state, 1),
        MouseEventKind::ScrollDown => move_down(state, 1, list_len),
        _ => Action::Ignored,
    }
}
