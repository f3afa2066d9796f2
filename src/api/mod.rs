//! Version service access
//!
//! [`VersionRepository`] is the seam everything else depends on. The
//! console wraps the concrete repository in a [`NotifyingRepository`] so
//! each call reports its outcome exactly once.

pub mod error;
pub mod http;
pub mod memory;
pub mod notifying;
pub mod traits;
pub mod types;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use http::{DEFAULT_TIMEOUT, HttpRepository, decode_response};
pub use memory::{Call, MemoryRepository};
pub use notifying::NotifyingRepository;
pub use traits::{Operation, VersionRepository};
pub use types::{
    DownloadBundle, Relation, TreeNode, TripleRow, VersionDetail, VersionId, VersionInput,
    VersionPage, VersionSummary, Visualization,
};
