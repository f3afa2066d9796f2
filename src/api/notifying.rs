//! Uniform user messaging around repository calls
//!
//! Every call through [`NotifyingRepository`] emits at most one
//! notification: one success for a mutating call that worked, one error
//! for any call that failed. The error is still returned so callers can
//! decide what to do next without reporting it again.

use super::error::{ApiError, ApiResult};
use super::traits::{Operation, VersionRepository};
use super::types::{
    DownloadBundle, VersionDetail, VersionId, VersionInput, VersionPage, Visualization,
};
use crate::notify::SharedNotifier;
use tracing::{info, warn};

/// Repository decorator that reports outcomes to a notifier
pub struct NotifyingRepository<R> {
    inner: R,
    notifier: SharedNotifier,
}

impl<R: VersionRepository> NotifyingRepository<R> {
    /// Wrap a repository
    pub fn new(inner: R, notifier: SharedNotifier) -> Self {
        Self { inner, notifier }
    }

    /// The notifier outcomes are reported to
    #[must_use]
    pub fn notifier(&self) -> &SharedNotifier {
        &self.notifier
    }

    /// The wrapped repository
    pub const fn inner(&self) -> &R {
        &self.inner
    }

    fn report<T>(&self, op: Operation, result: ApiResult<T>) -> ApiResult<T> {
        match &result {
            Ok(_) if op.is_mutating() => {
                info!(%op, "request succeeded");
                self.notifier.success(op.success_message());
            }
            Ok(_) => {}
            Err(err) => {
                warn!(%op, error = %err, "request failed");
                self.notifier.error(&failure_text(op, err));
            }
        }
        result
    }
}

/// One line describing a failed call
fn failure_text(op: Operation, err: &ApiError) -> String {
    let fallback = op.failure_message();
    let message = err.user_message(fallback);
    match err {
        // The generic texts already say what failed
        ApiError::Transport(_) | ApiError::Decode(_) => message,
        _ if message == fallback => message,
        _ => format!("{fallback}: {message}"),
    }
}

impl<R: VersionRepository> VersionRepository for NotifyingRepository<R> {
    fn list(&self, page: u32, search: &str) -> ApiResult<VersionPage> {
        self.report(Operation::List, self.inner.list(page, search))
    }

    fn get(&self, id: VersionId) -> ApiResult<VersionDetail> {
        self.report(Operation::Get, self.inner.get(id))
    }

    fn create(&self, input: &VersionInput) -> ApiResult<VersionDetail> {
        self.report(Operation::Create, self.inner.create(input))
    }

    fn update(&self, id: VersionId, input: &VersionInput) -> ApiResult<VersionDetail> {
        self.report(Operation::Update, self.inner.update(id, input))
    }

    fn delete(&self, id: VersionId) -> ApiResult<()> {
        self.report(Operation::Delete, self.inner.delete(id))
    }

    fn validate(&self, ontology_data: &str) -> ApiResult<Visualization> {
        self.report(Operation::Validate, self.inner.validate(ontology_data))
    }

    fn download(&self, id: VersionId) -> ApiResult<DownloadBundle> {
        self.report(Operation::Download, self.inner.download(id))
    }
}
