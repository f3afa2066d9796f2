//! In-memory version service
//!
//! Behaves like the real backend for everything this client relies on:
//! newest-updated-first ordering, substring search over name and
//! description, fixed page size, 400 with details on bad input and 404
//! on unknown ids. It also records every call and can be told to fail
//! the next call of a given kind, which is what the controller tests use.

use super::error::{ApiError, ApiResult, ErrorBody};
use super::traits::{Operation, VersionRepository};
use super::types::{
    DownloadBundle, Relation, TreeNode, TripleRow, VersionDetail, VersionId, VersionInput,
    VersionPage, VersionSummary, Visualization,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of versions per page, matching the service
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// A call received by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { page: u32, search: String },
    Get(VersionId),
    Create(String),
    Update(VersionId),
    Delete(VersionId),
    Validate(String),
    Download(VersionId),
}

impl Call {
    /// The operation this call belongs to
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::List { .. } => Operation::List,
            Self::Get(_) => Operation::Get,
            Self::Create(_) => Operation::Create,
            Self::Update(_) => Operation::Update,
            Self::Delete(_) => Operation::Delete,
            Self::Validate(_) => Operation::Validate,
            Self::Download(_) => Operation::Download,
        }
    }
}

#[derive(Debug, Clone)]
struct Stored {
    detail: VersionDetail,
    // Logical clock of the last write, for ordering
    touched: u64,
}

#[derive(Debug, Default)]
struct State {
    versions: Vec<Stored>,
    next_id: VersionId,
    clock: u64,
    calls: Vec<Call>,
    failures: HashMap<Operation, VecDeque<ApiError>>,
}

/// In-memory [`VersionRepository`]
#[derive(Debug)]
pub struct MemoryRepository {
    state: Mutex<State>,
    page_size: u64,
    inline_visualization: bool,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
            page_size: DEFAULT_PAGE_SIZE,
            inline_visualization: false,
        }
    }

    /// Use a different page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Return stored visualizations inline with `get`
    #[must_use]
    pub const fn with_inline_visualization(mut self, inline: bool) -> Self {
        self.inline_visualization = inline;
        self
    }

    /// Insert a version directly, without recording a call
    pub fn seed(&self, name: &str, description: &str, ontology_data: &str) -> VersionId {
        let mut state = self.lock();
        insert(
            &mut state,
            VersionInput {
                name: name.to_string(),
                description: description.to_string(),
                ontology_data: ontology_data.to_string(),
            },
        )
        .summary
        .id
        .unwrap_or_default()
    }

    /// Make the next call of `op` fail with `error`
    pub fn fail_next(&self, op: Operation, error: ApiError) {
        self.lock().failures.entry(op).or_default().push_back(error);
    }

    /// Every call received so far
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls of one operation received so far
    #[must_use]
    pub fn call_count(&self, op: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.operation() == op)
            .count()
    }

    /// Forget the call log
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Number of stored versions
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().versions.len()
    }

    /// Whether no versions are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and pop an injected failure for it, if any
    fn enter(&self, call: Call) -> ApiResult<MutexGuard<'_, State>> {
        let mut state = self.lock();
        let op = call.operation();
        state.calls.push(call);
        if let Some(err) = state.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            return Err(err);
        }
        Ok(state)
    }
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn check_input(input: &VersionInput) -> ApiResult<()> {
    let mut details = Vec::new();
    if input.name.trim().is_empty() {
        details.push("name is required".to_string());
    }
    if input.ontology_data.trim().is_empty() {
        details.push("ontology data is required".to_string());
    }
    if details.is_empty() {
        return Ok(());
    }
    Err(ApiError::from_status(
        400,
        ErrorBody {
            error: Some("Invalid parameters".to_string()),
            details: Some(details),
        },
    ))
}

fn not_found() -> ApiError {
    ApiError::from_status(
        404,
        ErrorBody {
            error: Some("Version not found".to_string()),
            details: None,
        },
    )
}

fn insert(state: &mut State, input: VersionInput) -> VersionDetail {
    let id = state.next_id;
    state.next_id += 1;
    state.clock += 1;
    let stamp = now();
    let visualization = derive_visualization(&input.ontology_data);
    let detail = VersionDetail {
        summary: VersionSummary {
            id: Some(id),
            name: input.name,
            description: input.description,
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
        },
        ontology_data: input.ontology_data,
        graph: Some(visualization.graph),
        tree: Some(visualization.tree),
        table: Some(visualization.table),
    };
    state.versions.push(Stored {
        detail: detail.clone(),
        touched: state.clock,
    });
    detail
}

/// Deterministic stand-in for the server's visualization engine
///
/// Every `rdf:about="..."` or `"@id": "..."` value becomes a tree node
/// and a table row; the graph is a small HTML page listing them.
#[must_use]
pub fn derive_visualization(text: &str) -> Visualization {
    let names = resource_names(text);
    let graph = format!(
        "<html><body><ul>{}</ul></body></html>",
        names
            .iter()
            .map(|n| format!("<li>{n}</li>"))
            .collect::<String>()
    );
    let tree = TreeNode::with_children(
        "Root",
        names.iter().map(|n| TreeNode::leaf(n.clone())).collect(),
    );
    let table = names
        .iter()
        .map(|n| TripleRow {
            source: n.clone(),
            relations: vec![Relation {
                relation: "rdf:type".to_string(),
                target: "owl:Class".to_string(),
            }],
        })
        .collect();
    Visualization { graph, tree, table }
}

fn resource_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    for marker in ["rdf:about=\"", "\"@id\": \"", "\"@id\":\""] {
        let mut rest = text;
        while let Some(start) = rest.find(marker) {
            rest = &rest[start + marker.len()..];
            let Some(end) = rest.find('"') else { break };
            let value = &rest[..end];
            let name = value.rsplit(['#', '/']).next().unwrap_or(value);
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            rest = &rest[end..];
        }
    }
    names
}

fn looks_like_json(text: &str) -> bool {
    text.trim_start().starts_with(['{', '['])
}

impl VersionRepository for MemoryRepository {
    fn list(&self, page: u32, search: &str) -> ApiResult<VersionPage> {
        let state = self.enter(Call::List {
            page,
            search: search.to_string(),
        })?;
        let mut matching: Vec<&Stored> = state
            .versions
            .iter()
            .filter(|s| s.detail.summary.matches(search))
            .collect();
        matching.sort_by(|a, b| b.touched.cmp(&a.touched));

        let page_size = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        let offset = (page.max(1) as usize - 1).saturating_mul(page_size);
        let items = matching
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|s| s.detail.summary.clone())
            .collect();
        Ok(VersionPage {
            items,
            total: matching.len() as u64,
            page_size: self.page_size,
        })
    }

    fn get(&self, id: VersionId) -> ApiResult<VersionDetail> {
        let state = self.enter(Call::Get(id))?;
        let stored = state
            .versions
            .iter()
            .find(|s| s.detail.id() == Some(id))
            .ok_or_else(not_found)?;
        let mut detail = stored.detail.clone();
        if !self.inline_visualization {
            detail.graph = None;
            detail.tree = None;
            detail.table = None;
        }
        Ok(detail)
    }

    fn create(&self, input: &VersionInput) -> ApiResult<VersionDetail> {
        let mut state = self.enter(Call::Create(input.name.clone()))?;
        check_input(input)?;
        Ok(insert(&mut state, input.clone()))
    }

    fn update(&self, id: VersionId, input: &VersionInput) -> ApiResult<VersionDetail> {
        let mut state = self.enter(Call::Update(id))?;
        state.clock += 1;
        let clock = state.clock;
        let stored = state
            .versions
            .iter_mut()
            .find(|s| s.detail.id() == Some(id))
            .ok_or_else(not_found)?;
        check_input(input)?;

        let visualization = derive_visualization(&input.ontology_data);
        let detail = &mut stored.detail;
        detail.summary.name.clone_from(&input.name);
        detail.summary.description.clone_from(&input.description);
        detail.summary.updated_at = Some(now());
        detail.ontology_data.clone_from(&input.ontology_data);
        detail.graph = Some(visualization.graph);
        detail.tree = Some(visualization.tree);
        detail.table = Some(visualization.table);
        stored.touched = clock;
        Ok(stored.detail.clone())
    }

    fn delete(&self, id: VersionId) -> ApiResult<()> {
        let mut state = self.enter(Call::Delete(id))?;
        let index = state
            .versions
            .iter()
            .position(|s| s.detail.id() == Some(id))
            .ok_or_else(not_found)?;
        state.versions.remove(index);
        Ok(())
    }

    fn validate(&self, ontology_data: &str) -> ApiResult<Visualization> {
        let _state = self.enter(Call::Validate(ontology_data.to_string()))?;
        if ontology_data.trim().is_empty() {
            return Err(ApiError::from_status(
                400,
                ErrorBody {
                    error: Some("ontology_data must be provided".to_string()),
                    details: None,
                },
            ));
        }
        Ok(derive_visualization(ontology_data))
    }

    fn download(&self, id: VersionId) -> ApiResult<DownloadBundle> {
        let state = self.enter(Call::Download(id))?;
        let stored = state
            .versions
            .iter()
            .find(|s| s.detail.id() == Some(id))
            .ok_or_else(not_found)?;
        let text = &stored.detail.ontology_data;
        let (owl_data, jsonld_data) = if looks_like_json(text) {
            (String::new(), text.clone())
        } else {
            (text.clone(), String::new())
        };
        Ok(DownloadBundle {
            name: stored.detail.summary.name.clone(),
            owl_data,
            jsonld_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, data: &str) -> VersionInput {
        VersionInput {
            name: name.into(),
            description: String::new(),
            ontology_data: data.into(),
        }
    }

    #[test]
    fn test_create_assigns_ids_and_timestamps() {
        let repo = MemoryRepository::new();
        let a = repo.create(&input("a", "<rdf/>")).unwrap();
        let b = repo.create(&input("b", "<rdf/>")).unwrap();
        assert_eq!(a.id(), Some(1));
        assert_eq!(b.id(), Some(2));
        assert!(a.summary.created_at.is_some());
        assert!(a.summary.updated_at.is_some());
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let repo = MemoryRepository::new();
        let err = repo.create(&input("", "")).unwrap_err();
        match err {
            ApiError::Validation { details, .. } => assert_eq!(details.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(repo.is_empty());
    }

    #[test]
    fn test_list_orders_and_paginates() {
        let repo = MemoryRepository::new().with_page_size(2);
        for name in ["one", "two", "three"] {
            repo.seed(name, "", "<rdf/>");
        }
        let first = repo.list(1, "").unwrap();
        assert_eq!(first.total, 3);
        assert_eq!(first.page_size, 2);
        let names: Vec<_> = first.items.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["three", "two"]);

        let second = repo.list(2, "").unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].name, "one");
    }

    #[test]
    fn test_update_moves_version_to_front() {
        let repo = MemoryRepository::new();
        let first = repo.seed("first", "", "<rdf/>");
        repo.seed("second", "", "<rdf/>");
        repo.update(first, &input("first", "<rdf:RDF/>")).unwrap();
        let page = repo.list(1, "").unwrap();
        assert_eq!(page.items[0].id, Some(first));
    }

    #[test]
    fn test_search_filters_server_side() {
        let repo = MemoryRepository::new();
        repo.seed("Pizza", "food", "<rdf/>");
        repo.seed("Wine", "drinks", "<rdf/>");
        let page = repo.list(1, "FOOD").unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Pizza");
    }

    #[test]
    fn test_get_strips_visualization_unless_inline() {
        let repo = MemoryRepository::new();
        let id = repo.seed("a", "", r#"<owl:Class rdf:about="http://x#Pizza"/>"#);
        assert!(repo.get(id).unwrap().visualization().is_none());

        let inline = MemoryRepository::new().with_inline_visualization(true);
        let id = inline.seed("a", "", r#"<owl:Class rdf:about="http://x#Pizza"/>"#);
        let viz = inline.get(id).unwrap().visualization().unwrap();
        assert_eq!(viz.tree.children[0].name, "Pizza");
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let repo = MemoryRepository::new();
        assert!(repo.get(9).unwrap_err().is_not_found());
        assert!(repo.delete(9).unwrap_err().is_not_found());
        assert!(repo.update(9, &input("a", "b")).unwrap_err().is_not_found());
        assert!(repo.download(9).unwrap_err().is_not_found());
    }

    #[test]
    fn test_failure_injection_is_consumed_once() {
        let repo = MemoryRepository::new();
        repo.fail_next(Operation::List, ApiError::Transport("down".into()));
        assert!(repo.list(1, "").is_err());
        assert!(repo.list(1, "").is_ok());
        assert_eq!(repo.call_count(Operation::List), 2);
    }

    #[test]
    fn test_derive_visualization_from_jsonld() {
        let viz = derive_visualization(r#"{"@graph": [{"@id": "http://x/Wine"}]}"#);
        assert_eq!(viz.table.len(), 1);
        assert_eq!(viz.table[0].source, "Wine");
        assert!(viz.graph.contains("<li>Wine</li>"));
    }

    #[test]
    fn test_download_splits_by_format() {
        let repo = MemoryRepository::new();
        let owl = repo.seed("owl", "", "<rdf/>");
        let json = repo.seed("json", "", "{}");
        assert_eq!(repo.download(owl).unwrap().owl_data, "<rdf/>");
        assert_eq!(repo.download(json).unwrap().jsonld_data, "{}");
    }
}
