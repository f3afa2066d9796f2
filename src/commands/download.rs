//! Download command - save a version as {name}.zip

use super::Context;
use crate::api::{VersionId, VersionRepository};
use crate::{Result, archive};
use std::path::Path;

/// Execute the download command
///
/// Writes into `output`, or the configured download directory.
///
/// # Errors
///
/// Returns an error if the service call fails or the archive cannot be written.
pub fn execute(ctx: &Context, id: VersionId, output: Option<&Path>) -> Result<()> {
    let bundle = ctx.repo.download(id)?;
    let dir = output.map_or_else(|| ctx.config.download_dir(), Path::to_path_buf);
    let path = archive::save_bundle(&bundle, &dir)?;

    if ctx.quiet {
        println!("{}", path.display());
    } else {
        ctx.notifier
            .success(&format!("Downloaded to {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryRepository;
    use crate::config::OntoConfig;
    use crate::notify::RecordingNotifier;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_download_writes_named_zip() {
        let dir = TempDir::new().unwrap();
        let repo = Arc::new(MemoryRepository::new());
        let id = repo.seed("pizza menu", "", "<rdf:RDF/>");
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = Context {
            repo: crate::console::notifying(repo, notifier.clone()),
            notifier: notifier.clone(),
            config: OntoConfig::default(),
            quiet: false,
        };

        execute(&ctx, id, Some(dir.path())).unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with(".zip"));
        assert_eq!(notifier.success_count(), 1);
    }
}
