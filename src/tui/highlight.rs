//! Source text highlighting
//!
//! Converts syntect highlighting directly to ratatui styles. Without the
//! `syntax-highlighting` feature the text is shown plain.

use ratatui::text::Line;

#[cfg(feature = "syntax-highlighting")]
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
#[cfg(feature = "syntax-highlighting")]
use syntect::easy::HighlightLines;
#[cfg(feature = "syntax-highlighting")]
use syntect::highlighting::{FontStyle, ThemeSet};
#[cfg(feature = "syntax-highlighting")]
use syntect::parsing::SyntaxSet;

/// Syntax for ontology text: JSON-LD when it looks like JSON, XML otherwise
#[must_use]
pub fn syntax_extension(text: &str) -> &'static str {
    if text.trim_start().starts_with(['{', '[']) {
        "json"
    } else {
        "xml"
    }
}

/// Highlights source text, caching the last result
pub struct SourceHighlighter {
    #[cfg(feature = "syntax-highlighting")]
    syntax_set: SyntaxSet,
    #[cfg(feature = "syntax-highlighting")]
    theme_set: ThemeSet,
    cached_text: String,
    cached_lines: Vec<Line<'static>>,
}

impl Default for SourceHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceHighlighter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "syntax-highlighting")]
            syntax_set: SyntaxSet::load_defaults_newlines(),
            #[cfg(feature = "syntax-highlighting")]
            theme_set: ThemeSet::load_defaults(),
            cached_text: String::new(),
            cached_lines: Vec::new(),
        }
    }

    /// Styled lines for `text`
    pub fn lines(&mut self, text: &str) -> &[Line<'static>] {
        if self.cached_text != text {
            self.cached_lines = self.highlight(text);
            self.cached_text = text.to_string();
        }
        &self.cached_lines
    }

    #[cfg(feature = "syntax-highlighting")]
    fn highlight(&self, text: &str) -> Vec<Line<'static>> {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_extension(text))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let Some(theme) = self.theme_set.themes.get("base16-ocean.dark") else {
            return plain(text);
        };
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut lines = Vec::new();
        for line in text.lines() {
            // A line syntect chokes on is shown plain; the rest still highlight
            let Ok(ranges) = highlighter.highlight_line(line, &self.syntax_set) else {
                lines.push(Line::raw(line.to_string()));
                continue;
            };
            lines.push(Line::from(
                ranges
                    .into_iter()
                    .map(|(style, part)| Span::styled(part.to_string(), syntect_to_ratatui(&style)))
                    .collect::<Vec<_>>(),
            ));
        }
        lines
    }

    #[cfg(not(feature = "syntax-highlighting"))]
    fn highlight(&self, text: &str) -> Vec<Line<'static>> {
        plain(text)
    }
}

fn plain(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|line| Line::raw(line.to_string())).collect()
}

#[cfg(feature = "syntax-highlighting")]
const FONT_MODIFIERS: [(FontStyle, Modifier); 3] = [
    (FontStyle::BOLD, Modifier::BOLD),
    (FontStyle::ITALIC, Modifier::ITALIC),
    (FontStyle::UNDERLINE, Modifier::UNDERLINED),
];

/// Foreground and font modifiers; the syntect background is ignored
#[cfg(feature = "syntax-highlighting")]
fn syntect_to_ratatui(style: &syntect::highlighting::Style) -> Style {
    let color = style.foreground;
    FONT_MODIFIERS
        .iter()
        .filter(|(font, _)| style.font_style.contains(*font))
        .fold(
            Style::default().fg(Color::Rgb(color.r, color.g, color.b)),
            |acc, (_, modifier)| acc.add_modifier(*modifier),
        )
}
