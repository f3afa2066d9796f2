//! Bottom line of key hints

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SEPARATOR: &str = "  ";

/// One `key:action` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// e.g. "^S", "Enter"
    pub key: String,
    pub action: String,
}

impl KeyHint {
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }

    fn width(&self) -> usize {
        self.key.chars().count() + 1 + self.action.chars().count()
    }
}

/// Hints that fit the width, keeping the last hint (help) always visible
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints to draw in `width` columns
    fn fitting(&self, width: usize) -> Vec<&'a KeyHint> {
        let Some((last, rest)) = self.hints.split_last() else {
            return Vec::new();
        };
        let mut used = last.width();
        let mut shown: Vec<&KeyHint> = Vec::new();
        for hint in rest {
            let needed = hint.width() + SEPARATOR.len();
            if used + needed > width {
                break;
            }
            used += needed;
            shown.push(hint);
        }
        shown.push(last);
        shown
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, hint) in self.fitting(usize::from(area.width)).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.clone(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.clone()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("/", "search"),
            KeyHint::new("n", "new"),
            KeyHint::new("?", "help"),
        ]
    }

    #[test]
    fn test_all_hints_fit_wide_bar() {
        let hints = hints();
        let theme = Theme::default();
        assert_eq!(HelpBar::new(&hints, &theme).fitting(80).len(), 3);
    }

    #[test]
    fn test_narrow_bar_keeps_help() {
        let hints = hints();
        let theme = Theme::default();
        let shown = HelpBar::new(&hints, &theme).fitting(10);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].action, "help");
    }
}
