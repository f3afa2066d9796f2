//! Status bar widget for the latest notification

use crate::notify::MessageLevel;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget that displays the most recent message
pub struct StatusBar<'a> {
    message: Option<(MessageLevel, &'a str)>,
    theme: &'a Theme,
    /// Right-aligned summary (loading state, item counts)
    indicator: &'a str,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(message: Option<(MessageLevel, &'a str)>, theme: &'a Theme) -> Self {
        Self {
            message,
            theme,
            indicator: "",
        }
    }

    #[must_use]
    pub const fn with_indicator(mut self, indicator: &'a str) -> Self {
        self.indicator = indicator;
        self
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(inner);

        if let Some((level, text)) = self.message {
            let style = self.theme.level_style(level);
            Paragraph::new(Line::from(vec![
                Span::styled(Self::prefix_for_level(level), style),
                Span::styled(text, style),
            ]))
            .render(chunks[0], buf);
        }

        Paragraph::new(Line::styled(self.indicator, self.theme.dimmed_style()))
            .alignment(ratatui::layout::Alignment::Right)
            .render(chunks[1], buf);
    }
}
