//! Ratatui widgets for the console

mod alert;
mod confirm_dialog;
mod editor;
mod help_bar;
mod help_overlay;
mod status_bar;
mod text_input;
mod version_list;
mod visual;

pub use alert::AlertDialog;
pub use confirm_dialog::ConfirmDialog;
pub use editor::EditorPane;
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use status_bar::StatusBar;
pub use text_input::{TextInputModal, TextInputState};
pub use version_list::VersionList;
pub use visual::visual_lines;

use ratatui::layout::Rect;

/// Calculate a centered area for a modal
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Clear a centered box, draw its border and title, and return the inside
pub(crate) fn dialog_frame(
    area: Rect,
    buf: &mut ratatui::buffer::Buffer,
    (width, height): (u16, u16),
    title: &str,
    border: ratatui::style::Style,
) -> Rect {
    use ratatui::layout::Alignment;
    use ratatui::widgets::{Block, Borders, Clear, Widget};

    let outer = centered_rect(width, height, area);
    Clear.render(outer, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center);
    let inner = block.inner(outer);
    block.render(outer, buf);
    inner
}

/// Dialog width for a message, and the rows the message wraps to
pub(crate) fn dialog_size(message: &str, min: u16, max: u16, area: Rect) -> (u16, u16) {
    let chars = message.chars().count();
    let width = u16::try_from(chars + 6)
        .unwrap_or(max)
        .clamp(min, max)
        .min(area.width.saturating_sub(4));
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let rows = u16::try_from(chars.div_ceil(text_width).max(1)).unwrap_or(u16::MAX);
    (width, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(40, 40, area), area);
    }

    #[test]
    fn test_dialog_size_wraps_long_messages() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(dialog_size("short", 36, 64, area), (36, 1));
        let long = "x".repeat(120);
        assert_eq!(dialog_size(&long, 36, 64, area), (64, 2));
    }
}
