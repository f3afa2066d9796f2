//! Repository abstraction over the version service

use super::error::ApiResult;
use super::types::{
    DownloadBundle, VersionDetail, VersionId, VersionInput, VersionPage, Visualization,
};

/// Operation names, used for logging and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Validate,
    Download,
}

impl Operation {
    /// Whether a success should be announced to the user
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::Create | Self::Update | Self::Delete | Self::Validate
        )
    }

    /// Text announced after a successful call
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Version created",
            Self::Update => "Version updated",
            Self::Delete => "Version deleted",
            Self::Validate => "Visualization generated",
            Self::List => "Versions loaded",
            Self::Get => "Version loaded",
            Self::Download => "Version downloaded",
        }
    }

    /// Text shown when nothing better is known about a failure
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to load versions",
            Self::Get => "Failed to load version",
            Self::Create => "Failed to create version",
            Self::Update => "Failed to update version",
            Self::Delete => "Failed to delete version",
            Self::Validate => "Failed to generate visualization",
            Self::Download => "Failed to download version",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Validate => "validate",
            Self::Download => "download",
        };
        f.write_str(name)
    }
}

/// Stateless request/response access to versions
///
/// Implementations talk to the real service ([`super::HttpRepository`]),
/// hold everything in memory ([`super::MemoryRepository`]), or decorate
/// another repository ([`super::NotifyingRepository`]).
pub trait VersionRepository: Send + Sync {
    /// Fetch one page; `page` starts at 1 and an empty `search` means no filter
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    fn list(&self, page: u32, search: &str) -> ApiResult<VersionPage>;

    /// Fetch one version with its source text
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the id does not exist.
    fn get(&self, id: VersionId) -> ApiResult<VersionDetail>;

    /// Create a version; the server assigns id and timestamps
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` when the server rejects the input.
    fn create(&self, input: &VersionInput) -> ApiResult<VersionDetail>;

    /// Replace the editable fields of a version
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` or `ApiError::Validation`.
    fn update(&self, id: VersionId, input: &VersionInput) -> ApiResult<VersionDetail>;

    /// Delete a version
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the id does not exist.
    fn delete(&self, id: VersionId) -> ApiResult<()>;

    /// Derive graph, tree and table views from source text
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the server cannot parse the text.
    fn validate(&self, ontology_data: &str) -> ApiResult<Visualization>;

    /// Fetch both serializations of a version
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the id does not exist.
    fn download(&self, id: VersionId) -> ApiResult<DownloadBundle>;
}

impl<R: VersionRepository + ?Sized> VersionRepository for std::sync::Arc<R> {
    fn list(&self, page: u32, search: &str) -> ApiResult<VersionPage> {
        (**self).list(page, search)
    }

    fn get(&self, id: VersionId) -> ApiResult<VersionDetail> {
        (**self).get(id)
    }

    fn create(&self, input: &VersionInput) -> ApiResult<VersionDetail> {
        (**self).create(input)
    }

    fn update(&self, id: VersionId, input: &VersionInput) -> ApiResult<VersionDetail> {
        (**self).update(id, input)
    }

    fn delete(&self, id: VersionId) -> ApiResult<()> {
        (**self).delete(id)
    }

    fn validate(&self, ontology_data: &str) -> ApiResult<Visualization> {
        (**self).validate(ontology_data)
    }

    fn download(&self, id: VersionId) -> ApiResult<DownloadBundle> {
        (**self).download(id)
    }
}
