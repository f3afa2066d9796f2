//! Root orchestrator
//!
//! [`Console`] composes the list and draft controllers with a repository
//! and reconciles them after every call:
//!
//! - any successful create, update or delete refreshes the list with its
//!   current search term
//! - selecting a version clears the visualization before anything else
//! - deleting a version needs an explicit confirmation; declining issues
//!   no call
//! - fullscreen is presentation only and never touches modes or content
//!
//! Calls are dispatched as [`Job`]s to an [`Executor`]. With the inline
//! executor every dispatch settles before it returns; with the threaded one
//! [`Console::pump`] must be called regularly to apply finished calls.

pub mod executor;

use crate::api::{
    DownloadBundle, NotifyingRepository, VersionDetail, VersionId, VersionRepository,
    VersionSummary,
};
use crate::archive;
use crate::draft::{DraftController, DraftError, UploadFile, ViewMode, VisualMode};
use crate::list::{ListController, ListSignal};
use crate::notify::SharedNotifier;
pub use executor::{Executor, InlineExecutor, Job, Outcome, ThreadExecutor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A delete waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: VersionId,
    pub name: String,
}

/// Wrap a repository so every call reports its outcome exactly once
#[must_use]
pub fn notifying(
    repo: Arc<dyn VersionRepository>,
    notifier: SharedNotifier,
) -> Arc<dyn VersionRepository> {
    Arc::new(NotifyingRepository::new(repo, notifier))
}

/// Orchestrates list, draft and repository
pub struct Console {
    executor: Box<dyn Executor>,
    notifier: SharedNotifier,
    list: ListController,
    drafts: DraftController,
    pending_delete: Option<PendingDelete>,
    deleting: Option<VersionId>,
    alert: Option<String>,
    fullscreen: bool,
    download_dir: PathBuf,
    last_download: Option<PathBuf>,
}

impl Console {
    /// Create a console over an executor whose repository already reports
    /// outcomes to `notifier`
    #[must_use]
    pub fn new(executor: Box<dyn Executor>, notifier: SharedNotifier) -> Self {
        Self {
            executor,
            notifier,
            list: ListController::new(),
            drafts: DraftController::new(),
            pending_delete: None,
            deleting: None,
            alert: None,
            fullscreen: false,
            download_dir: PathBuf::from("."),
            last_download: None,
        }
    }

    /// Console that runs every call synchronously
    #[must_use]
    pub fn inline(repo: Arc<dyn VersionRepository>, notifier: SharedNotifier) -> Self {
        let repo = notifying(repo, notifier.clone());
        Self::new(Box::new(InlineExecutor::new(repo)), notifier)
    }

    /// Console that runs calls on a worker thread
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the worker thread cannot be spawned.
    pub fn threaded(
        repo: Arc<dyn VersionRepository>,
        notifier: SharedNotifier,
    ) -> std::io::Result<Self> {
        let repo = notifying(repo, notifier.clone());
        Ok(Self::new(Box::new(ThreadExecutor::spawn(repo)?), notifier))
    }

    /// Directory downloads are written to
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn list(&self) -> &ListController {
        &self.list
    }

    #[must_use]
    pub const fn drafts(&self) -> &DraftController {
        &self.drafts
    }

    #[must_use]
    pub const fn notifier(&self) -> &SharedNotifier {
        &self.notifier
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    #[must_use]
    pub fn last_download(&self) -> Option<&Path> {
        self.last_download.as_deref()
    }

    #[must_use]
    pub const fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Message of the open precondition alert, if any
    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether any call is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.executor.pending() > 0
            || self.list.is_loading()
            || self.drafts.is_loading()
            || self.drafts.is_saving()
            || self.deleting.is_some()
    }

    fn dispatch(&mut self, job: Job) {
        debug!(?job, "dispatching");
        self.executor.submit(job);
        self.pump();
    }

    /// Apply every finished call; returns how many were applied
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let outcomes = self.executor.poll();
            if outcomes.is_empty() {
                return applied;
            }
            for outcome in outcomes {
                self.apply(outcome);
                applied += 1;
            }
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::List(ticket, result) => match self.list.apply_page(&ticket, result) {
                ListSignal::SelectFirst(first) => self.select(first),
                ListSignal::NoVersions => self.drafts.start_new(),
                ListSignal::Idle => {}
            },
            Outcome::Detail(ticket, result) => {
                self.drafts.apply_detail(ticket, result);
            }
            Outcome::Save(ticket, result) => {
                if self.drafts.finish_save(&ticket, result) {
                    self.refresh();
                }
            }
            Outcome::Delete(id, result) => {
                self.deleting = None;
                if result.is_ok() {
                    info!(id, "version deleted");
                    if self.drafts.draft().id() == Some(id) {
                        self.drafts.start_new();
                    }
                    self.refresh();
                }
            }
            Outcome::Validate(ticket, result) => {
                self.drafts.apply_validation(&ticket, result);
            }
            Outcome::Download(_, result) => {
                if let Ok(bundle) = result {
                    self.save_download(&bundle);
                }
            }
        }
    }

    fn save_download(&mut self, bundle: &DownloadBundle) {
        match archive::save_bundle(bundle, &self.download_dir) {
            Ok(path) => {
                self.notifier
                    .success(&format!("Downloaded to {}", path.display()));
                self.last_download = Some(path);
            }
            Err(e) => self.notifier.error(&format!("Failed to save download: {e}")),
        }
    }

    /// Report a local precondition failure
    ///
    /// Rejected uploads are a single error notification; everything else
    /// opens an alert the user has to dismiss.
    fn raise(&mut self, err: &DraftError) {
        match err {
            DraftError::UnsupportedFile(_) => self.notifier.error(&err.to_string()),
            _ => self.alert = Some(err.to_string()),
        }
    }

    fn guard(&mut self, result: Result<(), DraftError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                self.raise(&e);
                false
            }
        }
    }

    /// Close the precondition alert
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Initial load
    pub fn start(&mut self) {
        let ticket = self.list.begin_reset("");
        self.dispatch(Job::List(ticket));
    }

    /// Search with a new term, starting over from page 1
    pub fn search(&mut self, term: &str) {
        let ticket = self.list.begin_reset(term);
        self.dispatch(Job::List(ticket));
    }

    /// Reload the list with its current search term
    pub fn refresh(&mut self) {
        let ticket = self.list.refresh();
        self.dispatch(Job::List(ticket));
    }

    /// Load the next page if there is one and none is loading
    pub fn load_more(&mut self) {
        if let Some(ticket) = self.list.begin_load_more() {
            self.dispatch(Job::List(ticket));
        }
    }

    /// The list cursor moved to `position`
    pub fn scrolled_to(&mut self, position: usize) {
        if self.list.should_load_more(position) {
            self.load_more();
        }
    }

    /// Show a version read-only
    pub fn select(&mut self, version: impl Into<VersionDetail>) {
        if let Some(ticket) = self.drafts.select_version(version.into()) {
            self.dispatch(Job::Detail(ticket));
        }
    }

    /// Select a loaded version by id
    pub fn select_id(&mut self, id: VersionId) {
        if let Some(summary) = self.list.find(id).cloned() {
            self.select(summary);
        }
    }

    /// Select a version and open it for editing
    pub fn edit_version(&mut self, version: impl Into<VersionDetail>) {
        if let Some(ticket) = self.drafts.edit(version.into()) {
            self.dispatch(Job::Detail(ticket));
        }
    }

    /// Open the current draft for editing
    pub fn edit(&mut self) {
        let result = self.drafts.begin_editing();
        self.guard(result);
    }

    /// Start a new, empty version
    pub fn new_version(&mut self) {
        self.drafts.start_new();
    }

    pub fn set_name(&mut self, name: &str) {
        let result = self.drafts.set_name(name);
        self.guard(result);
    }

    pub fn set_description(&mut self, description: &str) {
        let result = self.drafts.set_description(description);
        self.guard(result);
    }

    pub fn set_text(&mut self, text: &str) {
        let result = self.drafts.set_text(text);
        self.guard(result);
    }

    /// Save the draft as a new version or an update
    pub fn save(&mut self) {
        match self.drafts.begin_save() {
            Ok(ticket) => self.dispatch(Job::Save(ticket)),
            Err(e) => self.raise(&e),
        }
    }

    /// Discard edits
    pub fn cancel(&mut self) {
        self.drafts.cancel();
    }

    /// Validate the draft text against the service
    pub fn validate(&mut self) {
        match self.drafts.begin_validate() {
            Ok(ticket) => self.dispatch(Job::Validate(ticket)),
            Err(e) => self.raise(&e),
        }
    }

    /// Replace the draft text with a file
    pub fn upload(&mut self, file: UploadFile) {
        let result = self.drafts.upload(file);
        self.guard(result);
    }

    /// Ask to delete the open version
    pub fn request_delete_current(&mut self) {
        match self.drafts.draft().persisted() {
            Some(detail) if detail.id().is_some() => {
                let summary = detail.summary.clone();
                self.request_delete(&summary);
            }
            _ => self.alert = Some("Select a saved version to delete".to_string()),
        }
    }

    /// Ask to delete a version; nothing is sent until [`Console::confirm_delete`]
    pub fn request_delete(&mut self, version: &VersionSummary) {
        if self.deleting.is_some() {
            self.raise(&DraftError::DeleteInFlight);
            return;
        }
        if let Some(id) = version.id {
            self.pending_delete = Some(PendingDelete {
                id,
                name: version.name.clone(),
            });
        }
    }

    /// Issue the confirmed delete
    pub fn confirm_delete(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        if self.deleting.is_some() {
            self.raise(&DraftError::DeleteInFlight);
            return;
        }
        self.deleting = Some(pending.id);
        self.dispatch(Job::Delete(pending.id));
    }

    /// Decline the pending delete
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Download the open version as `{name}.zip`
    pub fn download(&mut self) {
        match self.drafts.draft().id() {
            Some(id) => self.dispatch(Job::Download(id)),
            None => self.alert = Some("Save the version before downloading it".to_string()),
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.drafts.set_view_mode(mode);
    }

    pub fn set_visual_mode(&mut self, mode: VisualMode) {
        self.drafts.set_visual_mode(mode);
    }
}
