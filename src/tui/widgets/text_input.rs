//! One-line prompt
//!
//! Holds the typed text as characters so cursor arithmetic never lands
//! inside a multi-byte sequence. Path prompts list matching directory
//! entries under the line; Tab takes the highlighted one.

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::path::Path;

const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    pub prompt: String,
    chars: Vec<char>,
    /// Index into `chars`; equals `chars.len()` at the end of the line
    cursor: usize,
    complete_paths: bool,
    suggestions: Vec<String>,
    highlighted: usize,
}

impl TextInputState {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_path_completion(mut self) -> Self {
        self.complete_paths = true;
        self.refresh_suggestions();
        self
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Replace the text, cursor at the end
    pub fn set_buffer(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
        self.refresh_suggestions();
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = if self.complete_paths {
            path_candidates(&self.text())
        } else {
            Vec::new()
        };
        self.highlighted = self.highlighted.min(self.suggestions.len().saturating_sub(1));
    }

    #[must_use]
    pub fn show_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
        self.refresh_suggestions();
    }

    pub fn backspace(&mut self) {
        let Some(prev) = self.cursor.checked_sub(1) else {
            return;
        };
        self.chars.remove(prev);
        self.cursor = prev;
        self.refresh_suggestions();
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
            self.refresh_suggestions();
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Move the highlight up, wrapping to the last entry
    pub fn suggestion_up(&mut self) {
        let count = self.suggestions.len();
        if count > 0 {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    /// Move the highlight down, wrapping to the first entry
    pub fn suggestion_down(&mut self) {
        let count = self.suggestions.len();
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn accept_suggestion(&mut self) {
        if let Some(choice) = self.suggestions.get(self.highlighted).cloned() {
            self.highlighted = 0;
            self.set_buffer(&choice);
        }
    }

    /// Ctrl-W: drop the word before the cursor, stopping after a space or '/'
    pub fn delete_word_backwards(&mut self) {
        let head = &self.chars[..self.cursor];
        let end = head
            .iter()
            .rposition(|c| !c.is_whitespace())
            .map_or(0, |i| i + 1);
        let start = head[..end]
            .iter()
            .rposition(|&c| c.is_whitespace() || c == '/')
            .map_or(0, |i| i + 1);
        self.chars.drain(start..self.cursor);
        self.cursor = start;
        self.refresh_suggestions();
    }

    /// Ctrl-U
    pub fn clear_line(&mut self) {
        self.set_buffer("");
    }

    /// Visible slice of `width` characters that keeps the cursor in view
    fn window(&self, width: usize) -> (usize, usize) {
        let width = width.max(1);
        // One extra column for the cursor at the end of the line
        let start = (self.cursor + 1).saturating_sub(width);
        (start, (start + width).min(self.chars.len()))
    }
}

/// Entries of the typed directory whose names start with the typed file part
fn path_candidates(typed: &str) -> Vec<String> {
    let (dir, prefix) = typed
        .rfind('/')
        .map_or(("", typed), |i| (&typed[..=i], &typed[i + 1..]));
    let listing = match dir.strip_prefix("~/").zip(dirs::home_dir()) {
        Some((rest, home)) => home.join(rest),
        None if dir.is_empty() => Path::new(".").to_path_buf(),
        None => Path::new(dir).to_path_buf(),
    };

    let Ok(entries) = std::fs::read_dir(listing) else {
        return Vec::new();
    };
    let show_hidden = prefix.starts_with('.');
    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(prefix) || (name.starts_with('.') && !show_hidden) {
                return None;
            }
            let slash = if entry.file_type().is_ok_and(|t| t.is_dir()) { "/" } else { "" };
            Some(format!("{dir}{name}{slash}"))
        })
        .collect();
    names.sort();
    names.truncate(MAX_SUGGESTIONS);
    names
}

/// Centered prompt box with the line, optional completions and key help
pub struct TextInputModal<'a> {
    state: &'a TextInputState,
    theme: &'a Theme,
}

impl<'a> TextInputModal<'a> {
    #[must_use]
    pub const fn new(state: &'a TextInputState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn input_line(&self, width: usize) -> Line<'static> {
        let state = self.state;
        let (start, end) = state.window(width);
        let before: String = state.chars[start..state.cursor].iter().collect();
        let at = state.chars.get(state.cursor).copied().unwrap_or(' ');
        let after: String = state.chars[(state.cursor + 1).min(end)..end].iter().collect();
        Line::from(vec![
            Span::raw(before),
            Span::styled(
                at.to_string(),
                self.theme.cursor_style().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(after),
        ])
    }

    fn suggestion_lines(&self) -> Vec<Line<'static>> {
        self.state
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, path)| {
                if i == self.state.highlighted {
                    Line::styled(format!("› {path}"), self.theme.cursor_style())
                } else {
                    Line::styled(format!("  {path}"), self.theme.dimmed_style())
                }
            })
            .collect()
    }
}

impl Widget for TextInputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let suggestions = self.suggestion_lines();
        let width = 64.min(area.width.saturating_sub(4));
        // Border, line, gap, suggestions, gap, help, border
        let rows = 5 + suggestions.len() + usize::from(!suggestions.is_empty());
        let height = u16::try_from(rows).unwrap_or(u16::MAX);
        let popup = super::centered_rect(width, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(format!(" {} ", self.state.prompt))
            .title_alignment(Alignment::Center);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![self.input_line(usize::from(inner.width)), Line::default()];
        let help = if suggestions.is_empty() {
            "Enter: submit  Esc: cancel"
        } else {
            lines.extend(suggestions);
            lines.push(Line::default());
            "Tab: take  ↑/↓: choose  Enter: submit  Esc: cancel"
        };
        lines.push(Line::styled(help, self.theme.dimmed_style()).alignment(Alignment::Center));
        Paragraph::new(lines).render(inner, buf);
    }
}
