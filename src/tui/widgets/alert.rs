//! Blocking alert for local precondition failures

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    widgets::{Paragraph, Widget, Wrap},
};

/// Alert overlay; must be dismissed before anything else happens
pub struct AlertDialog<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> AlertDialog<'a> {
    #[must_use]
    pub const fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, text_rows) = super::dialog_size(self.message, 36, 64, area);
        let border = self.theme.error_style().add_modifier(Modifier::BOLD);
        let inner = super::dialog_frame(area, buf, (width, text_rows + 5), "Alert", border);

        let [_, text, _, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(text_rows),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(text, buf);
        Paragraph::new("Enter/Esc: dismiss")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center)
            .render(help, buf);
    }
}
