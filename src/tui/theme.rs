//! Console colors
//!
//! Widgets never pick colors themselves; they ask the theme for a style
//! by role. `NO_COLOR` selects the monochrome theme.

use crate::draft::DraftState;
use crate::notify::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Cursor marker and key names
    pub cursor: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    /// Border of the pane that has focus
    pub focused_border: Color,
    pub dimmed: Color,
    /// State badges: viewing, editing, new
    pub viewing: Color,
    pub editing: Color,
    pub unsaved: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            focused_border: Color::Cyan,
            dimmed: Color::DarkGray,
            viewing: Color::Magenta,
            editing: Color::Yellow,
            unsaved: Color::Green,
        }
    }

    /// Terminal default colors only; emphasis comes from modifiers
    #[must_use]
    pub const fn monochrome() -> Self {
        Self {
            selection_bg: Color::Reset,
            selection_fg: Color::Reset,
            cursor: Color::Reset,
            success: Color::Reset,
            error: Color::Reset,
            warning: Color::Reset,
            info: Color::Reset,
            border: Color::Reset,
            focused_border: Color::Reset,
            dimmed: Color::Reset,
            viewing: Color::Reset,
            editing: Color::Reset,
            unsaved: Color::Reset,
        }
    }

    /// Dark theme unless `NO_COLOR` is set
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(v) if !v.is_empty() => Self::monochrome(),
            _ => Self::dark(),
        }
    }

    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD | self.reverse_if_plain())
    }

    // Monochrome selection needs reverse video to be visible at all
    fn reverse_if_plain(&self) -> Modifier {
        if self.selection_bg == Color::Reset {
            Modifier::REVERSED
        } else {
            Modifier::empty()
        }
    }

    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn level_style(&self, level: MessageLevel) -> Style {
        let color = match level {
            MessageLevel::Success => self.success,
            MessageLevel::Error => self.error,
            MessageLevel::Warning => self.warning,
            MessageLevel::Info => self.info,
        };
        Style::default().fg(color)
    }

    /// Badge for the draft's state
    #[must_use]
    pub fn state_style(&self, state: DraftState) -> Style {
        let color = match state {
            DraftState::Viewing => self.viewing,
            DraftState::Editing => self.editing,
            DraftState::NewUnsaved => self.unsaved,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[must_use]
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.focused_border)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_badges_differ() {
        let theme = Theme::dark();
        assert_ne!(
            theme.state_style(DraftState::Viewing),
            theme.state_style(DraftState::Editing)
        );
    }

    #[test]
    fn test_monochrome_selection_is_reversed() {
        let style = Theme::monochrome().selected_style();
        assert!(style.add_modifier.contains(Modifier::REVERSED));
        let style = Theme::dark().selected_style();
        assert!(!style.add_modifier.contains(Modifier::REVERSED));
    }
}
