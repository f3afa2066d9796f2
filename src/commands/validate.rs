//! Validate command - generate the visualizations for a file

use super::Context;
use crate::api::{VersionRepository, Visualization};
use crate::draft::{DraftController, UploadFile};
use crate::{Result, output};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// What to print or write once the visualization arrives
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Exports {
    pub tree: bool,
    pub table: bool,
    pub csv: Option<PathBuf>,
    pub graph: Option<PathBuf>,
}

/// Execute the validate command
///
/// # Errors
///
/// Returns an error if the file is unusable or empty, validation fails,
/// or an export cannot be written.
pub fn execute(ctx: &Context, file: &Path, exports: &Exports) -> Result<()> {
    let mut drafts = DraftController::new();
    drafts.upload(UploadFile::read(file)?)?;
    let ticket = drafts.begin_validate()?;
    let visualization = ctx.repo.validate(&ticket.text)?;

    if !ctx.quiet {
        print_summary(&visualization);
    }
    if exports.tree {
        for line in output::render_tree(&visualization.tree) {
            println!("{line}");
        }
    }
    if exports.table {
        for line in output::render_table(&visualization.table) {
            println!("{line}");
        }
    }
    if let Some(path) = &exports.csv {
        output::write_table_csv(&visualization.table, path)?;
        ctx.notifier.success(&format!("Table written to {}", path.display()));
    }
    if let Some(path) = &exports.graph {
        fs::write(path, &visualization.graph)?;
        ctx.notifier.success(&format!("Graph written to {}", path.display()));
    }
    Ok(())
}

fn print_summary(visualization: &Visualization) {
    let triples: usize = visualization.table.iter().map(|r| r.relations.len()).sum();
    println!(
        "{} {} tree nodes, {} table rows, {triples} triples, {} of graph markup",
        "Visualization:".bold(),
        visualization.tree.node_count(),
        visualization.table.len(),
        output::format_size(visualization.graph.len())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OntoError;
    use crate::api::{MemoryRepository, Operation};
    use crate::config::OntoConfig;
    use crate::draft::DraftError;
    use crate::notify::RecordingNotifier;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn context(repo: Arc<MemoryRepository>) -> Context {
        let notifier = Arc::new(RecordingNotifier::new());
        Context {
            repo: crate::console::notifying(repo, notifier.clone()),
            notifier,
            config: OntoConfig::default(),
            quiet: true,
        }
    }

    #[test]
    fn test_empty_file_never_reaches_service() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty.owl");
        fs::write(&file, "   \n").unwrap();

        let repo = Arc::new(MemoryRepository::new());
        let err = execute(&context(repo.clone()), &file, &Exports::default()).unwrap_err();
        assert!(matches!(err, OntoError::Draft(DraftError::EmptyContent)));
        assert_eq!(repo.call_count(Operation::Validate), 0);
    }

    #[test]
    fn test_exports_written() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pizza.owl");
        fs::write(&file, r#"<owl:Class rdf:about="http://x#Pizza"/>"#).unwrap();
        let exports = Exports {
            csv: Some(dir.path().join("table.csv")),
            graph: Some(dir.path().join("graph.html")),
            ..Exports::default()
        };

        execute(&context(Arc::new(MemoryRepository::new())), &file, &exports).unwrap();

        let csv = fs::read_to_string(dir.path().join("table.csv")).unwrap();
        assert!(csv.starts_with("source,relation,target\n"));
        let graph = fs::read_to_string(dir.path().join("graph.html")).unwrap();
        assert!(graph.contains("<html>"));
    }
}
