//! Download packaging
//!
//! A downloaded version is saved as `{name}.zip` holding `{name}.owl`
//! (RDF/XML) and `{name}.jsonld` (JSON-LD), exactly as served.

use crate::api::DownloadBundle;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// File stem used for a bundle, safe to use as a path component
#[must_use]
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "ontology".to_string()
    } else {
        stem
    }
}

/// Package both serializations into an in-memory zip archive
///
/// # Errors
///
/// Returns `ZipError` if the archive cannot be written.
pub fn package_bundle(bundle: &DownloadBundle) -> ZipResult<Vec<u8>> {
    let stem = file_stem(&bundle.name);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file(format!("{stem}.owl"), options)?;
    zip.write_all(bundle.owl_data.as_bytes())?;
    zip.start_file(format!("{stem}.jsonld"), options)?;
    zip.write_all(bundle.jsonld_data.as_bytes())?;
    Ok(zip.finish()?.into_inner())
}

/// Write `{name}.zip` into `dir`, creating the directory if needed
///
/// # Errors
///
/// Returns an error if packaging fails or the file cannot be written.
pub fn save_bundle(bundle: &DownloadBundle, dir: &Path) -> crate::Result<PathBuf> {
    let bytes = package_bundle(bundle)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.zip", file_stem(&bundle.name)));
    std::fs::write(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "saved download");
    Ok(path)
}
