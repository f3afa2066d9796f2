//! Delete confirmation

use crate::console::PendingDelete;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

pub struct ConfirmDialog<'a> {
    pending: &'a PendingDelete,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    #[must_use]
    pub const fn new(pending: &'a PendingDelete, theme: &'a Theme) -> Self {
        Self { pending, theme }
    }

    fn message(&self) -> String {
        format!(
            "Delete version '{}'? This cannot be undone.",
            self.pending.name
        )
    }

    fn button(&self, label: &'static str, color: Color) -> Span<'static> {
        let style = if color == Color::Reset {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        };
        Span::styled(label, style)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = self.message();
        let (width, text_rows) = super::dialog_size(&message, 40, 70, area);
        let border = self.theme.warning_style().add_modifier(Modifier::BOLD);
        let inner =
            super::dialog_frame(area, buf, (width, text_rows + 6), "Delete Version", border);

        let [_, text, _, buttons, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(text_rows),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(text, buf);

        let row = Line::from(vec![
            self.button(" [Y] Delete ", self.theme.error),
            Span::raw("    "),
            self.button(" [N] Keep ", self.theme.success),
        ]);
        Paragraph::new(row)
            .alignment(Alignment::Center)
            .render(buttons, buf);

        Paragraph::new("Y/Enter: delete  N/Esc: keep")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center)
            .render(help, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_the_version() {
        let pending = PendingDelete {
            id: 3,
            name: "wine".into(),
        };
        let theme = Theme::default();
        assert_eq!(
            ConfirmDialog::new(&pending, &theme).message(),
            "Delete version 'wine'? This cannot be undone."
        );
    }
}
