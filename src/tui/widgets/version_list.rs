//! Version list widget

use crate::api::{VersionId, VersionSummary};
use crate::list::ListController;
use crate::output::format_timestamp;
use crate::tui::state::UiState;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// Paginated version list with cursor and the open version marked
pub struct VersionList<'a> {
    list: &'a ListController,
    state: &'a UiState,
    theme: &'a Theme,
    open: Option<VersionId>,
    focused: bool,
}

impl<'a> VersionList<'a> {
    #[must_use]
    pub const fn new(list: &'a ListController, state: &'a UiState, theme: &'a Theme) -> Self {
        Self {
            list,
            state,
            theme,
            open: None,
            focused: false,
        }
    }

    /// Mark the version shown in the editor
    #[must_use]
    pub const fn open(mut self, id: Option<VersionId>) -> Self {
        self.open = id;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self, shown: usize) -> String {
        let search = self.list.search();
        if search.is_empty() {
            format!(" Versions ({shown}/{}) ", self.list.total())
        } else {
            format!(" Versions ({shown}/{}) \"{search}\" ", self.list.total())
        }
    }

    fn render_item(&self, item: &VersionSummary, is_cursor: bool) -> ListItem<'static> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let open_char = if item.id.is_some() && item.id == self.open {
            "●"
        } else {
            " "
        };
        let text_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::styled(open_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(item.name.clone(), text_style),
        ];
        if !item.description.is_empty() {
            spans.push(Span::styled(
                format!(" - {}", item.description),
                self.theme.dimmed_style(),
            ));
        }
        spans.push(Span::styled(
            format!("  {}", format_timestamp(item.updated_at.as_deref())),
            self.theme.dimmed_style(),
        ));
        ListItem::new(Line::from(spans))
    }
}

impl Widget for VersionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.list.visible_items();
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title(items.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if items.is_empty() {
            let text = if self.list.is_loading_first_page() {
                "Loading versions..."
            } else {
                "No versions yet. Press n to create one."
            };
            List::new([ListItem::new(Line::styled(text, self.theme.dimmed_style()))])
                .render(inner, buf);
            return;
        }

        let visible_height = inner.height as usize;
        let start = self.state.scroll_offset.min(items.len().saturating_sub(1));
        let end = (start + visible_height).min(items.len());
        let mut rows: Vec<ListItem> = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| self.render_item(item, start + offset == self.state.cursor))
            .collect();

        if self.list.is_loading_more() && rows.len() >= visible_height {
            rows.pop();
        }
        if self.list.is_loading_more() {
            rows.push(ListItem::new(Line::styled(
                "  Loading more...",
                self.theme.dimmed_style(),
            )));
        }
        List::new(rows).render(inner, buf);
    }
}
