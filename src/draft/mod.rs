//! Draft/editor controller
//!
//! Owns the single version currently being viewed or edited. Like the list
//! controller it performs no I/O: operations that need the service return a
//! ticket describing the call, and the matching `apply_*`/`finish_*` method
//! takes the response.
//!
//! The visualization is tied to a text *generation*. Every change of text
//! identity (switching versions, saving, resetting) bumps the generation and
//! clears the visualization; a validation result computed for an older
//! generation is dropped on arrival.

pub mod upload;

use crate::api::{ApiResult, VersionDetail, VersionId, VersionInput, Visualization};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};
pub use upload::UploadFile;

/// Local precondition failures, reported without calling the service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("There is no ontology content to validate. Enter or upload some first.")]
    EmptyContent,

    #[error("Unsupported file '{0}'. Choose an OWL/RDF (.owl, .rdf, .xml) or JSON-LD (.json, .jsonld) file.")]
    UnsupportedFile(String),

    #[error("Start editing the version first")]
    NotEditing,

    #[error("A save is already in progress")]
    SaveInFlight,

    #[error("A delete is already in progress")]
    DeleteInFlight,

    #[error("The version is still loading. Try again once it is shown.")]
    Loading,
}

/// Lifecycle state of the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// Persisted version, read-only
    Viewing,
    /// Persisted version with unsaved edits
    Editing,
    /// No id yet, fields mutable
    NewUnsaved,
}

/// What the editor body shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Source,
    Visual,
    /// Source and visualization side by side
    Compare,
}

impl ViewMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Visual => "visual",
            Self::Compare => "compare",
        }
    }
}

/// Which visualization the visual view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualMode {
    #[default]
    Graph,
    Tree,
    Table,
}

impl VisualMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Tree => "tree",
            Self::Table => "table",
        }
    }

    /// Text shown in place of a visualization that has not been generated
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Graph => "No graph yet. Run validate first to generate the graph view.",
            Self::Tree => "No class tree yet. Run validate first to generate the tree view.",
            Self::Table => "No triple table yet. Run validate first to generate the table view.",
        }
    }
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Viewing => "viewing",
            Self::Editing => "editing",
            Self::NewUnsaved => "new",
        })
    }
}

/// The working copy of one version
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub name: String,
    pub description: String,
    /// Editable source text
    pub ontology_data: String,
    /// Last persisted state, `None` for a new version
    persisted: Option<VersionDetail>,
    visualization: Option<Visualization>,
    state: DraftState,
    view_mode: ViewMode,
    visual_mode: VisualMode,
}

impl Draft {
    fn new_unsaved(view_mode: ViewMode, visual_mode: VisualMode) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            ontology_data: String::new(),
            persisted: None,
            visualization: None,
            state: DraftState::NewUnsaved,
            view_mode,
            visual_mode,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<VersionId> {
        self.persisted.as_ref().and_then(VersionDetail::id)
    }

    #[must_use]
    pub const fn persisted(&self) -> Option<&VersionDetail> {
        self.persisted.as_ref()
    }

    #[must_use]
    pub const fn visualization(&self) -> Option<&Visualization> {
        self.visualization.as_ref()
    }

    #[must_use]
    pub const fn state(&self) -> DraftState {
        self.state
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.state != DraftState::Viewing
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub const fn visual_mode(&self) -> VisualMode {
        self.visual_mode
    }

    /// Text as last loaded from the service
    #[must_use]
    pub fn loaded_text(&self) -> &str {
        self.persisted.as_ref().map_or("", |p| p.ontology_data.as_str())
    }

    /// Whether fields differ from the persisted version
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        match &self.persisted {
            Some(p) => {
                self.name != p.summary.name
                    || self.description != p.summary.description
                    || self.ontology_data != p.ontology_data
            }
            None => {
                !self.name.is_empty() || !self.description.is_empty() || !self.ontology_data.is_empty()
            }
        }
    }

    fn input(&self) -> VersionInput {
        VersionInput {
            name: self.name.clone(),
            description: self.description.clone(),
            ontology_data: self.ontology_data.clone(),
        }
    }

    fn adopt_fields(&mut self, detail: &VersionDetail) {
        self.name.clone_from(&detail.summary.name);
        self.description.clone_from(&detail.summary.description);
        self.ontology_data.clone_from(&detail.ontology_data);
    }
}

/// Request for a version's full detail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub seq: u64,
    pub id: VersionId,
}

/// The call a save turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(VersionInput),
    Update(VersionId, VersionInput),
}

/// A save in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    pub seq: u64,
    pub request: SaveRequest,
}

/// A validation in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateTicket {
    pub generation: u64,
    pub text: String,
}

/// Draft state machine
#[derive(Debug, Clone)]
pub struct DraftController {
    draft: Draft,
    // Bumped on every selection; stale detail and save responses compare against it
    selection_seq: u64,
    // Bumped on every text identity change
    generation: u64,
    pending_detail: Option<DetailTicket>,
    // Enter editing once the pending detail lands
    edit_when_loaded: bool,
    saving: bool,
    validating: bool,
}

impl Default for DraftController {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftController {
    /// Start with an empty new version
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::new_unsaved(ViewMode::default(), VisualMode::default()),
            selection_seq: 0,
            generation: 0,
            pending_detail: None,
            edit_when_loaded: false,
            saving: false,
            validating: false,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Whether a detail fetch for the current selection is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending_detail.is_some()
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub const fn is_validating(&self) -> bool {
        self.validating
    }

    fn invalidate_visualization(&mut self) {
        self.generation += 1;
        self.draft.visualization = None;
        self.validating = false;
    }

    /// Show a version read-only
    ///
    /// The previous visualization is cleared first. A version that already
    /// carries all three visualization parts is adopted directly; otherwise
    /// the returned ticket asks for its full detail.
    pub fn select_version(&mut self, version: VersionDetail) -> Option<DetailTicket> {
        self.selection_seq += 1;
        self.edit_when_loaded = false;
        self.invalidate_visualization();
        self.draft.state = DraftState::Viewing;
        self.draft.adopt_fields(&version);

        let inline = version.visualization();
        let id = version.id();
        self.draft.persisted = Some(version);

        match (inline, id) {
            (Some(visualization), _) => {
                self.pending_detail = None;
                self.draft.visualization = Some(visualization);
                None
            }
            (None, Some(id)) => {
                let ticket = DetailTicket {
                    seq: self.selection_seq,
                    id,
                };
                debug!(id, "fetching version detail");
                self.pending_detail = Some(ticket);
                Some(ticket)
            }
            (None, None) => {
                self.pending_detail = None;
                None
            }
        }
    }

    /// Adopt a fetched detail; returns whether it was applied
    pub fn apply_detail(&mut self, ticket: DetailTicket, result: ApiResult<VersionDetail>) -> bool {
        if self.pending_detail != Some(ticket) {
            trace!(id = ticket.id, "dropping stale version detail");
            return false;
        }
        self.pending_detail = None;
        let edit = std::mem::take(&mut self.edit_when_loaded);
        let Ok(detail) = result else {
            return false;
        };
        self.invalidate_visualization();
        self.draft.adopt_fields(&detail);
        self.draft.visualization = detail.visualization();
        self.draft.persisted = Some(detail);
        if edit {
            self.open_for_editing();
        }
        true
    }

    /// Reset to an empty new version
    pub fn start_new(&mut self) {
        self.selection_seq += 1;
        self.pending_detail = None;
        self.edit_when_loaded = false;
        self.invalidate_visualization();
        self.draft = Draft::new_unsaved(self.draft.view_mode, self.draft.visual_mode);
    }

    /// Select a version and open it for editing in the source view
    ///
    /// A version without its full detail stays read-only until the returned
    /// ticket is applied.
    pub fn edit(&mut self, version: VersionDetail) -> Option<DetailTicket> {
        let ticket = self.select_version(version);
        if ticket.is_some() {
            self.edit_when_loaded = true;
        } else {
            self.open_for_editing();
        }
        ticket
    }

    fn open_for_editing(&mut self) {
        self.draft.view_mode = ViewMode::Source;
        self.draft.state = DraftState::Editing;
    }

    /// Open the current version for editing without reselecting it
    ///
    /// # Errors
    ///
    /// Returns `DraftError::Loading` while the version's detail is pending and
    /// `DraftError::NotEditing` when there is nothing persisted to edit.
    pub fn begin_editing(&mut self) -> Result<(), DraftError> {
        if self.is_loading() {
            return Err(DraftError::Loading);
        }
        match self.draft.state {
            DraftState::Editing | DraftState::NewUnsaved => Ok(()),
            DraftState::Viewing if self.draft.persisted.is_some() => {
                self.open_for_editing();
                Ok(())
            }
            DraftState::Viewing => Err(DraftError::NotEditing),
        }
    }

    fn require_editing(&self) -> Result<(), DraftError> {
        if self.is_loading() {
            Err(DraftError::Loading)
        } else if self.draft.is_editing() {
            Ok(())
        } else {
            Err(DraftError::NotEditing)
        }
    }

    /// Replace the version name
    ///
    /// # Errors
    ///
    /// Returns `DraftError::NotEditing` outside an editing state and
    /// `DraftError::Loading` while the detail is pending.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DraftError> {
        self.require_editing()?;
        self.draft.name = name.into();
        Ok(())
    }

    /// Replace the description
    ///
    /// # Errors
    ///
    /// Returns `DraftError::NotEditing` outside an editing state and
    /// `DraftError::Loading` while the detail is pending.
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), DraftError> {
        self.require_editing()?;
        self.draft.description = description.into();
        Ok(())
    }

    /// Replace the source text
    ///
    /// # Errors
    ///
    /// Returns `DraftError::NotEditing` outside an editing state and
    /// `DraftError::Loading` while the detail is pending.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), DraftError> {
        self.require_editing()?;
        self.draft.ontology_data = text.into();
        Ok(())
    }

    pub const fn set_view_mode(&mut self, mode: ViewMode) {
        self.draft.view_mode = mode;
    }

    pub const fn set_visual_mode(&mut self, mode: VisualMode) {
        self.draft.visual_mode = mode;
    }

    /// Turn the draft into a create or update call
    ///
    /// # Errors
    ///
    /// Returns `DraftError::Loading` while the detail is pending,
    /// `DraftError::NotEditing` outside an editing state and
    /// `DraftError::SaveInFlight` while another save is pending.
    pub fn begin_save(&mut self) -> Result<SaveTicket, DraftError> {
        self.require_editing()?;
        if self.saving {
            return Err(DraftError::SaveInFlight);
        }
        let input = self.draft.input();
        let request = match (self.draft.state, self.draft.id()) {
            (DraftState::Editing, Some(id)) => SaveRequest::Update(id, input),
            _ => SaveRequest::Create(input),
        };
        self.saving = true;
        Ok(SaveTicket {
            seq: self.selection_seq,
            request,
        })
    }

    /// Settle a save; returns whether it succeeded
    ///
    /// On failure nothing changes, so the user can fix the input and retry.
    /// A success for a draft the user has since navigated away from is not
    /// adopted, but still counts as a success.
    pub fn finish_save(&mut self, ticket: &SaveTicket, result: ApiResult<VersionDetail>) -> bool {
        self.saving = false;
        let Ok(detail) = result else {
            return false;
        };
        if ticket.seq == self.selection_seq {
            self.invalidate_visualization();
            self.draft.adopt_fields(&detail);
            self.draft.persisted = Some(detail);
            self.draft.state = DraftState::Viewing;
        }
        true
    }

    /// Discard edits
    ///
    /// An edited version reverts to its persisted fields; a new version is
    /// cleared and stays editable.
    pub fn cancel(&mut self) {
        match self.draft.state {
            DraftState::Viewing => {}
            DraftState::NewUnsaved => self.start_new(),
            DraftState::Editing => {
                self.invalidate_visualization();
                if let Some(persisted) = self.draft.persisted.clone() {
                    self.draft.adopt_fields(&persisted);
                }
                self.draft.state = DraftState::Viewing;
            }
        }
    }

    /// Text that validation should run on: the edited text, else the loaded one
    #[must_use]
    pub fn validation_text(&self) -> Option<&str> {
        [self.draft.ontology_data.as_str(), self.draft.loaded_text()]
            .into_iter()
            .find(|text| !text.trim().is_empty())
    }

    /// Prepare a validation call
    ///
    /// # Errors
    ///
    /// Returns `DraftError::Loading` while the detail is pending,
    /// `DraftError::NotEditing` outside an editing state and
    /// `DraftError::EmptyContent` when there is no text at all.
    pub fn begin_validate(&mut self) -> Result<ValidateTicket, DraftError> {
        self.require_editing()?;
        let text = self
            .validation_text()
            .ok_or(DraftError::EmptyContent)?
            .to_string();
        self.validating = true;
        Ok(ValidateTicket {
            generation: self.generation,
            text,
        })
    }

    /// Store a validation result; returns whether it was applied
    pub fn apply_validation(
        &mut self,
        ticket: &ValidateTicket,
        result: ApiResult<Visualization>,
    ) -> bool {
        if ticket.generation != self.generation {
            trace!("dropping visualization for superseded text");
            return false;
        }
        self.validating = false;
        match result {
            Ok(visualization) => {
                self.draft.visualization = Some(visualization);
                true
            }
            Err(_) => false,
        }
    }

    /// Replace the text with an uploaded file
    ///
    /// For a new version whose name is still empty, the file name without
    /// its extension becomes the name.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::Loading` while the detail is pending,
    /// `DraftError::NotEditing` outside an editing state and
    /// `DraftError::UnsupportedFile` for a file outside the allow-set. None of
    /// them changes any state.
    pub fn upload(&mut self, file: UploadFile) -> Result<(), DraftError> {
        self.require_editing()?;
        if !file.is_allowed() {
            return Err(DraftError::UnsupportedFile(file.name));
        }
        if self.draft.state == DraftState::NewUnsaved && self.draft.name.trim().is_empty() {
            self.draft.name = file.stem();
        }
        debug!(file = %file.name, bytes = file.content.len(), "uploaded file");
        self.draft.ontology_data = file.content;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ErrorBody, TreeNode, VersionSummary};

    fn detail(id: i64, text: &str) -> VersionDetail {
        VersionDetail {
            ontology_data: text.into(),
            ..VersionDetail::from(VersionSummary::new(id, format!("v{id}"), "desc"))
        }
    }

    fn viz(graph: &str) -> Visualization {
        Visualization {
            graph: graph.into(),
            tree: TreeNode::leaf("Root"),
            table: Vec::new(),
        }
    }

    fn with_inline(mut d: VersionDetail) -> VersionDetail {
        let v = viz("<inline/>");
        d.graph = Some(v.graph);
        d.tree = Some(v.tree);
        d.table = Some(v.table);
        d
    }

    fn unprocessable() -> ApiError {
        ApiError::from_status(
            422,
            ErrorBody {
                error: Some("Invalid parameters".into()),
                details: Some(vec!["name is required".into()]),
            },
        )
    }

    #[test]
    fn test_starts_as_new_unsaved() {
        let drafts = DraftController::new();
        assert_eq!(drafts.draft().state(), DraftState::NewUnsaved);
        assert!(drafts.draft().is_editing());
        assert!(drafts.draft().id().is_none());
    }

    #[test]
    fn test_select_fetches_detail_and_clears_visualization() {
        let mut drafts = DraftController::new();
        drafts.select_version(with_inline(detail(1, "<a/>")));
        assert!(drafts.draft().visualization().is_some());

        let ticket = drafts
            .select_version(VersionSummary::new(2, "v2", "").into())
            .unwrap();
        assert_eq!(ticket.id, 2);
        assert!(drafts.draft().visualization().is_none());
        assert!(drafts.is_loading());
        assert_eq!(drafts.draft().state(), DraftState::Viewing);

        assert!(drafts.apply_detail(ticket, Ok(detail(2, "<b/>"))));
        assert_eq!(drafts.draft().ontology_data, "<b/>");
        assert!(drafts.draft().visualization().is_none());
        assert!(!drafts.is_loading());
    }

    #[test]
    fn test_select_adopts_inline_visualization() {
        let mut drafts = DraftController::new();
        assert!(drafts.select_version(with_inline(detail(1, "<a/>"))).is_none());
        assert_eq!(drafts.draft().visualization().unwrap().graph, "<inline/>");
    }

    #[test]
    fn test_stale_detail_is_dropped() {
        let mut drafts = DraftController::new();
        let first = drafts.select_version(VersionSummary::new(1, "v1", "").into()).unwrap();
        let second = drafts.select_version(VersionSummary::new(2, "v2", "").into()).unwrap();

        assert!(!drafts.apply_detail(first, Ok(detail(1, "<one/>"))));
        assert_eq!(drafts.draft().name, "v2");
        assert!(drafts.apply_detail(second, Ok(detail(2, "<two/>"))));
        assert_eq!(drafts.draft().ontology_data, "<two/>");
    }

    #[test]
    fn test_edit_forces_source_view() {
        let mut drafts = DraftController::new();
        drafts.set_view_mode(ViewMode::Compare);
        drafts.set_visual_mode(VisualMode::Table);
        drafts.edit(with_inline(detail(3, "<c/>")));
        assert_eq!(drafts.draft().view_mode(), ViewMode::Source);
        assert_eq!(drafts.draft().visual_mode(), VisualMode::Table);
        assert_eq!(drafts.draft().state(), DraftState::Editing);
    }

    #[test]
    fn test_save_new_creates_and_existing_updates() {
        let mut drafts = DraftController::new();
        drafts.set_name("v1").unwrap();
        let ticket = drafts.begin_save().unwrap();
        assert!(matches!(ticket.request, SaveRequest::Create(ref i) if i.name == "v1"));
        drafts.finish_save(&ticket, Err(ApiError::Transport("down".into())));

        drafts.edit(with_inline(detail(7, "<x/>")));
        let ticket = drafts.begin_save().unwrap();
        assert!(matches!(ticket.request, SaveRequest::Update(7, _)));
    }

    #[test]
    fn test_save_success_adopts_and_views() {
        let mut drafts = DraftController::new();
        drafts.set_name("v1").unwrap();
        drafts.set_text("<rdf/>").unwrap();
        let ticket = drafts.begin_save().unwrap();
        assert!(drafts.finish_save(&ticket, Ok(detail(1, "<rdf/>"))));

        assert_eq!(drafts.draft().id(), Some(1));
        assert_eq!(drafts.draft().state(), DraftState::Viewing);
        assert!(drafts.draft().visualization().is_none());
        assert!(!drafts.is_saving());
    }

    #[test]
    fn test_save_failure_keeps_fields_and_state() {
        let mut drafts = DraftController::new();
        drafts.edit(with_inline(detail(7, "<x/>")));
        drafts.set_name("renamed").unwrap();
        drafts.set_description("changed").unwrap();
        drafts.set_text("<y/>").unwrap();

        let ticket = drafts.begin_save().unwrap();
        assert!(!drafts.finish_save(&ticket, Err(unprocessable())));

        let draft = drafts.draft();
        assert!(draft.is_editing());
        assert_eq!(draft.name, "renamed");
        assert_eq!(draft.description, "changed");
        assert_eq!(draft.ontology_data, "<y/>");
        assert!(drafts.begin_save().is_ok(), "retry allowed after failure");
    }

    #[test]
    fn test_second_save_rejected_while_pending() {
        let mut drafts = DraftController::new();
        drafts.begin_save().unwrap();
        assert_eq!(drafts.begin_save().unwrap_err(), DraftError::SaveInFlight);
    }

    #[test]
    fn test_save_requires_editing() {
        let mut drafts = DraftController::new();
        drafts.select_version(with_inline(detail(1, "<a/>")));
        assert_eq!(drafts.begin_save().unwrap_err(), DraftError::NotEditing);
        assert_eq!(drafts.set_text("x").unwrap_err(), DraftError::NotEditing);
    }

    #[test]
    fn test_save_after_navigating_away_is_not_adopted() {
        let mut drafts = DraftController::new();
        drafts.set_name("v1").unwrap();
        let ticket = drafts.begin_save().unwrap();
        drafts.select_version(with_inline(detail(5, "<five/>")));

        assert!(drafts.finish_save(&ticket, Ok(detail(1, "<one/>"))));
        assert_eq!(drafts.draft().id(), Some(5));
    }

    #[test]
    fn test_cancel_edit_reverts_to_persisted() {
        let mut drafts = DraftController::new();
        drafts.edit(with_inline(detail(2, "<orig/>")));
        drafts.set_text("<changed/>").unwrap();
        drafts.set_name("other").unwrap();
        assert!(drafts.draft().is_dirty());

        drafts.cancel();
        assert_eq!(drafts.draft().state(), DraftState::Viewing);
        assert_eq!(drafts.draft().ontology_data, "<orig/>");
        assert_eq!(drafts.draft().name, "v2");
        assert!(!drafts.draft().is_dirty());
    }

    #[test]
    fn test_cancel_new_stays_editable() {
        let mut drafts = DraftController::new();
        drafts.set_name("half").unwrap();
        drafts.set_text("<partial/>").unwrap();
        drafts.cancel();
        assert_eq!(drafts.draft().state(), DraftState::NewUnsaved);
        assert!(drafts.draft().name.is_empty());
        assert!(drafts.draft().ontology_data.is_empty());
    }

    #[test]
    fn test_validate_requires_content() {
        let mut drafts = DraftController::new();
        assert_eq!(drafts.begin_validate().unwrap_err(), DraftError::EmptyContent);
        assert!(!drafts.is_validating());
    }

    #[test]
    fn test_validate_prefers_edited_text() {
        let mut drafts = DraftController::new();
        drafts.edit(with_inline(detail(1, "<loaded/>")));
        assert_eq!(drafts.begin_validate().unwrap().text, "<loaded/>");

        drafts.set_text("<edited/>").unwrap();
        let ticket = drafts.begin_validate().unwrap();
        assert_eq!(ticket.text, "<edited/>");

        assert!(drafts.apply_validation(&ticket, Ok(viz("<g/>"))));
        assert_eq!(drafts.draft().visualization().unwrap().graph, "<g/>");
    }

    #[test]
    fn test_validation_for_superseded_text_is_dropped() {
        let mut drafts = DraftController::new();
        drafts.set_text("<a/>").unwrap();
        let ticket = drafts.begin_validate().unwrap();
        drafts.select_version(VersionSummary::new(4, "v4", "").into());

        assert!(!drafts.apply_validation(&ticket, Ok(viz("<old/>"))));
        assert!(drafts.draft().visualization().is_none());
    }

    #[test]
    fn test_upload_autofills_name_for_new() {
        let mut drafts = DraftController::new();
        drafts
            .upload(UploadFile::new("report.owl", Some("application/rdf+xml"), "<rdf/>"))
            .unwrap();
        assert_eq!(drafts.draft().name, "report");
        assert_eq!(drafts.draft().ontology_data, "<rdf/>");

        drafts
            .upload(UploadFile::new("other.rdf", None, "<other/>"))
            .unwrap();
        assert_eq!(drafts.draft().name, "report");
    }

    #[test]
    fn test_upload_keeps_name_when_editing_existing() {
        let mut drafts = DraftController::new();
        drafts.edit(with_inline(detail(3, "<x/>")));
        drafts.set_name("").unwrap();
        drafts.upload(UploadFile::new("file.owl", None, "<y/>")).unwrap();
        assert_eq!(drafts.draft().name, "");
    }

    #[test]
    fn test_upload_rejects_unsupported_without_change() {
        let mut drafts = DraftController::new();
        drafts.set_text("<keep/>").unwrap();
        let before = drafts.draft().clone();
        let err = drafts
            .upload(UploadFile::new("notes.txt", Some("text/plain"), "hello"))
            .unwrap_err();
        assert_eq!(err, DraftError::UnsupportedFile("notes.txt".into()));
        assert_eq!(drafts.draft(), &before);
    }

    #[test]
    fn test_upload_requires_editing() {
        let mut drafts = DraftController::new();
        drafts.select_version(with_inline(detail(1, "<a/>")));
        let err = drafts.upload(UploadFile::new("a.owl", None, "<b/>")).unwrap_err();
        assert_eq!(err, DraftError::NotEditing);
        assert_eq!(drafts.draft().ontology_data, "<a/>");
    }

    #[test]
    fn test_begin_editing_current() {
        let mut drafts = DraftController::new();
        drafts.select_version(with_inline(detail(1, "<a/>")));
        drafts.set_view_mode(ViewMode::Visual);
        drafts.begin_editing().unwrap();
        assert_eq!(drafts.draft().state(), DraftState::Editing);
        assert_eq!(drafts.draft().view_mode(), ViewMode::Source);
        assert!(drafts.draft().visualization().is_some());
    }

    #[test]
    fn test_edit_waits_for_detail() {
        let mut drafts = DraftController::new();
        let ticket = drafts.edit(VersionSummary::new(1, "v1", "").into()).unwrap();
        assert_eq!(drafts.draft().state(), DraftState::Viewing);
        assert_eq!(drafts.set_text("<mine/>").unwrap_err(), DraftError::Loading);
        assert_eq!(drafts.begin_save().unwrap_err(), DraftError::Loading);
        assert!(!drafts.is_saving());

        assert!(drafts.apply_detail(ticket, Ok(detail(1, "<rdf/>"))));
        assert_eq!(drafts.draft().state(), DraftState::Editing);
        assert_eq!(drafts.draft().ontology_data, "<rdf/>");

        drafts.set_text("<mine/>").unwrap();
        let save = drafts.begin_save().unwrap();
        assert!(matches!(save.request, SaveRequest::Update(1, ref i) if i.ontology_data == "<mine/>"));
    }

    #[test]
    fn test_failed_detail_leaves_edit_unopened() {
        let mut drafts = DraftController::new();
        let ticket = drafts.edit(VersionSummary::new(1, "v1", "").into()).unwrap();
        assert!(!drafts.apply_detail(ticket, Err(ApiError::Transport("down".into()))));
        assert_eq!(drafts.draft().state(), DraftState::Viewing);
        assert!(!drafts.is_loading());
    }

    #[test]
    fn test_reselect_cancels_deferred_edit() {
        let mut drafts = DraftController::new();
        drafts.edit(VersionSummary::new(1, "v1", "").into()).unwrap();
        let second = drafts.select_version(VersionSummary::new(2, "v2", "").into()).unwrap();
        drafts.apply_detail(second, Ok(detail(2, "<two/>")));
        assert_eq!(drafts.draft().state(), DraftState::Viewing);
    }

    #[test]
    fn test_loading_blocks_field_changes() {
        let mut drafts = DraftController::new();
        drafts.select_version(VersionSummary::new(1, "v1", "").into()).unwrap();
        assert_eq!(drafts.begin_editing().unwrap_err(), DraftError::Loading);
        assert_eq!(drafts.set_name("x").unwrap_err(), DraftError::Loading);
        assert_eq!(drafts.set_description("x").unwrap_err(), DraftError::Loading);
        let err = drafts.upload(UploadFile::new("a.owl", None, "<b/>")).unwrap_err();
        assert_eq!(err, DraftError::Loading);
        assert_eq!(drafts.draft().name, "v1");
    }

    #[test]
    fn test_validate_while_loading_is_not_empty_content() {
        let mut drafts = DraftController::new();
        drafts.select_version(VersionSummary::new(1, "v1", "").into()).unwrap();
        assert_eq!(drafts.begin_validate().unwrap_err(), DraftError::Loading);
        assert!(!drafts.is_validating());
    }

    #[test]
    fn test_placeholders_differ_per_mode() {
        assert_ne!(VisualMode::Graph.placeholder(), VisualMode::Tree.placeholder());
        assert!(VisualMode::Table.placeholder().contains("validate"));
    }
}
