//! Key reference overlay

use crate::tui::events::BINDINGS;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const KEY_COLUMN: usize = 12;

/// Every binding, grouped by section, in a box sized to fit
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn content(&self) -> Vec<Line<'static>> {
        let heading = self.theme.cursor_style().add_modifier(Modifier::UNDERLINED);
        let mut lines = Vec::new();
        let mut section = "";
        for &(group, key, description) in BINDINGS {
            if group != section {
                section = group;
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                lines.push(Line::styled(format!(" {group}"), heading));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("   {key:<KEY_COLUMN$}"), self.theme.cursor_style()),
                Span::raw(description),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::styled(" Press any key to close", self.theme.dimmed_style()));
        lines
    }
}

/// Columns needed for the widest binding row
fn content_width() -> u16 {
    let widest = BINDINGS
        .iter()
        .map(|(_, _, description)| 3 + KEY_COLUMN + description.chars().count())
        .max()
        .unwrap_or(0);
    // Two border columns and a space of padding
    u16::try_from(widest + 3).unwrap_or(u16::MAX)
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.content();
        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let popup = super::centered_rect(content_width(), height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(" Keys ")
            .title_alignment(Alignment::Center);
        Paragraph::new(lines).block(block).render(popup, buf);
    }
}
