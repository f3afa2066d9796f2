//! Output formatting for CLI display
//!
//! Shared by the one-shot commands and the console: timestamps, version
//! lines, and text renderings of the tree and table visualizations.

use crate::api::{TreeNode, TripleRow, VersionSummary};
use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Local, NaiveDateTime};
use colored::Colorize;
use std::path::Path;

/// Format a server timestamp in local time, or `-` when absent
///
/// The service sends ISO timestamps with or without an offset; naive ones
/// are taken as UTC. Anything unparseable is shown as received.
#[must_use]
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "-".to_string();
    };
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc().with_timezone(&Local))
        });
    parsed.map_or_else(
        |_| raw.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Human-readable size of a text
#[must_use]
pub fn format_size(bytes: usize) -> String {
    Byte::from_u64(bytes as u64)
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}

/// Format a version for a list
#[must_use]
pub fn version_line(version: &VersionSummary, quiet: bool) -> String {
    let id = version
        .id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    if quiet {
        return format!("{id}\t{}", version.name);
    }
    let updated = format_timestamp(version.updated_at.as_deref());
    if version.description.is_empty() {
        format!("  {:>5}  {}  {}", id.bold(), version.name, updated.dimmed())
    } else {
        format!(
            "  {:>5}  {} - {}  {}",
            id.bold(),
            version.name,
            version.description,
            updated.dimmed()
        )
    }
}

/// Display label of a tree node
#[must_use]
pub fn node_label(node: &TreeNode) -> String {
    match &node.label {
        Some(label) if !label.is_empty() && *label != node.name => format!("{} ({label})", node.name),
        _ => node.name.clone(),
    }
}

/// Render a tree with box-drawing guides, one node per line
#[must_use]
pub fn render_tree(root: &TreeNode) -> Vec<String> {
    let mut lines = vec![node_label(root)];
    render_children(&root.children, "", &mut lines);
    lines
}

fn render_children(children: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (branch, extend) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        lines.push(format!("{prefix}{branch}{}", node_label(child)));
        render_children(&child.children, &format!("{prefix}{extend}"), lines);
    }
}

/// Flatten the triple table into `(source, relation, target)` rows
#[must_use]
pub fn flatten_table(rows: &[TripleRow]) -> Vec<(&str, &str, &str)> {
    rows.iter()
        .flat_map(|row| {
            row.relations
                .iter()
                .map(|r| (row.source.as_str(), r.relation.as_str(), r.target.as_str()))
        })
        .collect()
}

/// Render the triple table as aligned text columns
#[must_use]
pub fn render_table(rows: &[TripleRow]) -> Vec<String> {
    let flat = flatten_table(rows);
    let width = |pick: fn(&(&str, &str, &str)) -> usize, header: &str| {
        flat.iter().map(pick).max().unwrap_or(0).max(header.len())
    };
    let w_source = width(|r| r.0.chars().count(), "SOURCE");
    let w_relation = width(|r| r.1.chars().count(), "RELATION");

    let mut lines = vec![format!("{:<w_source$}  {:<w_relation$}  TARGET", "SOURCE", "RELATION")];
    lines.extend(
        flat.iter()
            .map(|(s, r, t)| format!("{s:<w_source$}  {r:<w_relation$}  {t}")),
    );
    lines
}

/// Write the triple table as CSV with a header row
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_table_csv(rows: &[TripleRow], path: &Path) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["source", "relation", "target"])?;
    for (source, relation, target) in flatten_table(rows) {
        writer.write_record([source, relation, target])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Relation;

    fn rows() -> Vec<TripleRow> {
        vec![
            TripleRow {
                source: "Pizza".into(),
                relations: vec![
                    Relation {
                        relation: "subClassOf".into(),
                        target: "Food".into(),
                    },
                    Relation {
                        relation: "hasTopping".into(),
                        target: "Topping".into(),
                    },
                ],
            },
            TripleRow {
                source: "Topping".into(),
                relations: vec![],
            },
        ]
    }

    #[test]
    fn test_format_timestamp_variants() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some("")), "-");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_timestamp(Some("2024-03-01T10:20:30")).len(), 16);
        assert_eq!(format_timestamp(Some("2024-03-01T10:20:30.123456")).len(), 16);
        assert_eq!(format_timestamp(Some("2024-03-01T10:20:30+00:00")).len(), 16);
    }

    #[test]
    fn test_render_tree() {
        let tree = TreeNode::with_children(
            "Root",
            vec![
                TreeNode::with_children("Food", vec![TreeNode::leaf("Pizza")]),
                TreeNode::leaf("Drink"),
            ],
        );
        assert_eq!(
            render_tree(&tree),
            vec!["Root", "├── Food", "│   └── Pizza", "└── Drink"]
        );
    }

    #[test]
    fn test_node_label_includes_distinct_label() {
        let mut node = TreeNode::leaf("Pizza");
        node.label = Some("Pizza pie".into());
        assert_eq!(node_label(&node), "Pizza (Pizza pie)");
        node.label = Some("Pizza".into());
        assert_eq!(node_label(&node), "Pizza");
    }

    #[test]
    fn test_flatten_and_render_table() {
        let rows = rows();
        assert_eq!(flatten_table(&rows).len(), 2);
        let lines = render_table(&rows);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SOURCE"));
        assert!(lines[1].starts_with("Pizza   subClassOf  Food"));
    }

    #[test]
    fn test_write_table_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        write_table_csv(&rows(), &path).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            text,
            "source,relation,target\nPizza,subClassOf,Food\nPizza,hasTopping,Topping\n"
        );
    }

    #[test]
    fn test_quiet_version_line() {
        let v = VersionSummary::new(4, "wine", "red");
        assert_eq!(version_line(&v, true), "4\twine");
    }

    #[test]
    fn test_format_size() {
        assert!(format_size(2048).contains("KiB"));
    }
}
