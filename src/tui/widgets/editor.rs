//! Editor pane: draft header and body

use crate::draft::{Draft, DraftState, ViewMode};
use crate::output::format_timestamp;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Header with the draft's fields and a body chosen by the view mode
pub struct EditorPane<'a> {
    draft: &'a Draft,
    source: &'a [Line<'static>],
    visual: Vec<Line<'static>>,
    theme: &'a Theme,
    scroll: u16,
    focused: bool,
    /// Shown in the header while a call for this draft is running
    activity: Option<&'a str>,
}

impl<'a> EditorPane<'a> {
    #[must_use]
    pub fn new(draft: &'a Draft, source: &'a [Line<'static>], theme: &'a Theme) -> Self {
        Self {
            draft,
            source,
            visual: super::visual_lines(draft, theme),
            theme,
            scroll: 0,
            focused: false,
            activity: None,
        }
    }

    #[must_use]
    pub const fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub const fn activity(mut self, activity: Option<&'a str>) -> Self {
        self.activity = activity;
        self
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let draft = self.draft;
        let dim = self.theme.dimmed_style();
        let name = if draft.name.is_empty() {
            Span::styled("(unnamed)", dim)
        } else {
            Span::raw(draft.name.clone())
        };
        let mut title = vec![
            Span::styled(format!("[{}] ", draft.state()), self.theme.state_style(draft.state())),
            name,
        ];
        if draft.is_dirty() {
            title.push(Span::styled(" *", self.theme.warning_style()));
        }
        if let Some(activity) = self.activity {
            title.push(Span::styled(format!("  {activity}"), self.theme.cursor_style()));
        }

        let description = if draft.description.is_empty() {
            Span::styled("No description", dim)
        } else {
            Span::raw(draft.description.clone())
        };

        let (created, updated) = draft.persisted().map_or_else(
            || ("-".to_string(), "-".to_string()),
            |p| {
                (
                    format_timestamp(p.summary.created_at.as_deref()),
                    format_timestamp(p.summary.updated_at.as_deref()),
                )
            },
        );
        let meta = Line::from(vec![
            Span::styled(format!("created {created}  updated {updated}  "), dim),
            Span::styled(
                format!(
                    "view: {}  visual: {}",
                    draft.view_mode().label(),
                    draft.visual_mode().label()
                ),
                self.theme.cursor_style(),
            ),
        ]);

        vec![Line::from(title), Line::from(description), meta]
    }

    fn body(&self, title: &'static str, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style())
            .title(title);
        Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }

    fn border_style(&self) -> ratatui::style::Style {
        if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        }
    }

    fn source_lines(&self) -> Vec<Line<'static>> {
        if self.source.is_empty() {
            let hint = if self.draft.state() == DraftState::Viewing {
                "Empty source"
            } else {
                "Empty source. Press u to upload a file or Ctrl-e to write it in your editor."
            };
            vec![Line::styled(hint, self.theme.dimmed_style())]
        } else {
            self.source.to_vec()
        }
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([Constraint::Length(5), Constraint::Min(3)]).split(area);

        let header = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style())
            .title(" Version ");
        Paragraph::new(self.header_lines())
            .block(header)
            .render(chunks[0], buf);

        match self.draft.view_mode() {
            ViewMode::Source => self.body(" Source ", self.source_lines(), chunks[1], buf),
            ViewMode::Visual => self.body(" Visual ", self.visual.clone(), chunks[1], buf),
            ViewMode::Compare => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[1]);
                self.body(" Source ", self.source_lines(), halves[0], buf);
                self.body(" Visual ", self.visual.clone(), halves[1], buf);
            }
        }
    }
}
