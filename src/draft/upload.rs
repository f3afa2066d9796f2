//! Uploaded ontology files
//!
//! A file is accepted when either its MIME type or its extension names an
//! RDF/XML, OWL or JSON-LD document.

use std::path::Path;

/// MIME types accepted for upload
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/rdf+xml",
    "application/owl+xml",
    "application/xml",
    "text/xml",
    "application/json",
    "application/ld+json",
];

/// File extensions accepted for upload, lowercase and without the dot
pub const ALLOWED_EXTENSIONS: &[&str] = &["owl", "rdf", "xml", "json", "jsonld"];

/// A file picked for upload, already read as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name including extension, without directories
    pub name: String,
    /// MIME type, when the source knows it
    pub mime: Option<String>,
    pub content: String,
}

impl UploadFile {
    #[must_use]
    pub fn new(name: impl Into<String>, mime: Option<&str>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            content: content.into(),
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read as UTF-8 text.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = guess_mime(&name);
        Ok(Self {
            name,
            mime: mime.map(str::to_string),
            content,
        })
    }

    /// Lowercase extension, if any
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// File name with its last extension stripped
    #[must_use]
    pub fn stem(&self) -> String {
        match self.name.rfind('.') {
            Some(dot) if dot > 0 => self.name[..dot].to_string(),
            _ => self.name.clone(),
        }
    }

    /// Whether the MIME type or the extension is in the allow-set
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        let mime_ok = self
            .mime
            .as_deref()
            .is_some_and(|m| ALLOWED_MIME_TYPES.contains(&m.trim().to_lowercase().as_str()));
        let ext_ok = self
            .extension()
            .is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()));
        mime_ok || ext_ok
    }
}

/// MIME type for a known ontology file name
#[must_use]
pub fn guess_mime(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "owl" | "rdf" => Some("application/rdf+xml"),
        "xml" => Some("application/xml"),
        "json" => Some("application/json"),
        "jsonld" => Some("application/ld+json"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_by_extension_or_mime() {
        assert!(UploadFile::new("a.owl", None, "").is_allowed());
        assert!(UploadFile::new("a.JSONLD", None, "").is_allowed());
        assert!(UploadFile::new("noext", Some("text/xml"), "").is_allowed());
        assert!(!UploadFile::new("notes.txt", Some("text/plain"), "").is_allowed());
        assert!(!UploadFile::new("image.png", None, "").is_allowed());
    }

    #[test]
    fn test_stem_strips_last_extension() {
        assert_eq!(UploadFile::new("report.owl", None, "").stem(), "report");
        assert_eq!(UploadFile::new("a.b.rdf", None, "").stem(), "a.b");
        assert_eq!(UploadFile::new(".hidden", None, "").stem(), ".hidden");
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wine.rdf");
        std::fs::write(&path, "<rdf:RDF/>").unwrap();

        let file = UploadFile::read(&path).unwrap();
        assert_eq!(file.name, "wine.rdf");
        assert_eq!(file.mime.as_deref(), Some("application/rdf+xml"));
        assert_eq!(file.content, "<rdf:RDF/>");
    }
}
