//! Text renderings of the three visualization modes

use crate::draft::{Draft, VisualMode};
use crate::output::{render_table, render_tree};
use crate::tui::theme::Theme;
use ratatui::text::{Line, Span};

/// Lines for the current visual mode, or its placeholder
#[must_use]
pub fn visual_lines(draft: &Draft, theme: &Theme) -> Vec<Line<'static>> {
    let mode = draft.visual_mode();
    let Some(visualization) = draft.visualization() else {
        return vec![Line::styled(mode.placeholder(), theme.dimmed_style())];
    };

    match mode {
        VisualMode::Graph => {
            let mut lines = vec![
                Line::styled(
                    "Press o to open the graph in your browser",
                    theme.warning_style(),
                ),
                Line::default(),
            ];
            lines.extend(
                visualization
                    .graph
                    .lines()
                    .map(|l| Line::styled(l.to_string(), theme.dimmed_style())),
            );
            lines
        }
        VisualMode::Tree => render_tree(&visualization.tree)
            .into_iter()
            .map(Line::raw)
            .collect(),
        VisualMode::Table => {
            let mut rendered = render_table(&visualization.table).into_iter();
            let mut lines: Vec<Line<'static>> = rendered
                .next()
                .map(|header| Line::styled(header, theme.cursor_style()))
                .into_iter()
                .collect();
            lines.extend(rendered.map(|row| Line::from(Span::raw(row))));
            if visualization.table.is_empty() {
                lines.push(Line::styled("No triples", theme.dimmed_style()));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TreeNode, Visualization};
    use crate::draft::DraftController;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_placeholder_without_visualization() {
        let drafts = DraftController::new();
        let lines = visual_lines(drafts.draft(), &Theme::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), VisualMode::Graph.placeholder());
    }

    #[test]
    fn test_tree_mode_renders_nodes() {
        let mut drafts = DraftController::new();
        drafts.set_text("<rdf/>").unwrap();
        let ticket = drafts.begin_validate().unwrap();
        drafts.apply_validation(
            &ticket,
            Ok(Visualization {
                graph: "<html/>".into(),
                tree: TreeNode::with_children("Root", vec![TreeNode::leaf("Pizza")]),
                table: Vec::new(),
            }),
        );
        drafts.set_visual_mode(VisualMode::Tree);

        let lines = visual_lines(drafts.draft(), &Theme::default());
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text, vec!["Root", "└── Pizza"]);
    }
}
