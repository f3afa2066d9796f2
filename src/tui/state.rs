//! Console view state
//!
//! Everything the screen needs that is not version data: cursor and
//! scroll positions, the open prompt, and which pane has focus. Version
//! data itself lives in the [`Console`].

use super::widgets::{KeyHint, TextInputState};
use crate::console::Console;

/// What the keyboard currently drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing and editing
    #[default]
    Normal,
    /// Keybinding overlay
    Help,
    /// A text prompt is open
    Input,
    /// Delete confirmation
    Confirm,
    /// Precondition alert waiting to be dismissed
    Alert,
}

/// What a text prompt is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    Search,
    Name,
    Description,
    /// Path of a file to load as the source text
    Upload,
}

impl InputPurpose {
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Search => "Search versions",
            Self::Name => "Version name",
            Self::Description => "Description",
            Self::Upload => "Upload file (OWL/RDF or JSON-LD path)",
        }
    }
}

/// Which pane arrow keys move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    #[default]
    List,
    Editor,
}

/// Screen state
#[derive(Debug, Clone)]
pub struct UiState {
    mode: Mode,
    pub focus: FocusPane,
    /// Index into the visible version list
    pub cursor: usize,
    /// First visible row of the version list
    pub scroll_offset: usize,
    /// Rows available to the version list at the last draw
    pub visible_height: usize,
    /// Vertical scroll of the editor body
    pub body_scroll: u16,
    input: Option<(InputPurpose, TextInputState)>,
    pub hints: Vec<KeyHint>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            focus: FocusPane::List,
            cursor: 0,
            scroll_offset: 0,
            visible_height: 10,
            body_scroll: 0,
            input: None,
            hints: default_hints(),
        }
    }

    /// The effective mode
    ///
    /// An open alert outranks a pending delete, which outranks the mode
    /// chosen from the keyboard.
    #[must_use]
    pub fn mode_for(&self, console: &Console) -> Mode {
        if console.alert().is_some() {
            Mode::Alert
        } else if console.pending_delete().is_some() {
            Mode::Confirm
        } else {
            self.mode
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
    }

    /// Open a prompt prefilled with `initial`
    pub fn open_input(&mut self, purpose: InputPurpose, initial: &str) {
        let mut input = TextInputState::new(purpose.prompt());
        if purpose == InputPurpose::Upload {
            input = input.with_path_completion();
        }
        input.set_buffer(initial);
        self.input = Some((purpose, input));
        self.mode = Mode::Input;
    }

    /// Close the prompt, returning what it was for and what was typed
    pub fn close_input(&mut self) -> Option<(InputPurpose, String)> {
        self.mode = Mode::Normal;
        self.input
            .take()
            .map(|(purpose, input)| (purpose, input.text()))
    }

    #[must_use]
    pub fn input(&self) -> Option<&TextInputState> {
        self.input.as_ref().map(|(_, input)| input)
    }

    pub fn input_mut(&mut self) -> Option<&mut TextInputState> {
        self.input.as_mut().map(|(_, input)| input)
    }

    pub fn back_to_normal(&mut self) {
        self.mode = Mode::Normal;
        self.input = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::List => FocusPane::Editor,
            FocusPane::Editor => FocusPane::List,
        };
    }

    /// Move the cursor up one row
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Move the cursor down one row, staying within `len` rows
    pub fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
        self.adjust_scroll();
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height.max(1));
        self.adjust_scroll();
    }

    pub fn page_down(&mut self, len: usize) {
        self.cursor = (self.cursor + self.visible_height.max(1)).min(len.saturating_sub(1));
        self.adjust_scroll();
    }

    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    pub fn jump_to_end(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Keep the cursor valid after the list changed
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.adjust_scroll();
    }

    /// Put the cursor on the row showing `index`
    pub fn place_cursor(&mut self, index: usize) {
        self.cursor = index;
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        let height = self.visible_height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    pub fn scroll_body_up(&mut self, lines: u16) {
        self.body_scroll = self.body_scroll.saturating_sub(lines);
    }

    pub fn scroll_body_down(&mut self, lines: u16) {
        self.body_scroll = self.body_scroll.saturating_add(lines);
    }
}

fn default_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("↑/↓", "navigate"),
        KeyHint::new("Enter", "open"),
        KeyHint::new("/", "search"),
        KeyHint::new("n", "new"),
        KeyHint::new("e", "edit"),
        KeyHint::new("^S", "save"),
        KeyHint::new("v", "validate"),
        KeyHint::new("1/2/3", "view"),
        KeyHint::new("?", "help"),
        KeyHint::new("q", "quit"),
    ]
}
