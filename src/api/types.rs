//! Wire and domain types for the version service

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned version identifier
pub type VersionId = i64;

/// A version as it appears in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    /// Present for persisted versions only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VersionId>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl VersionSummary {
    /// Create a summary for a persisted version
    #[must_use]
    pub fn new(id: VersionId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            description: description.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Case-insensitive substring match over name and description
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// A full version: summary, source text and optional inline visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionDetail {
    #[serde(flatten)]
    pub summary: VersionSummary,
    /// The single canonical source text
    #[serde(default, deserialize_with = "null_as_default")]
    pub ontology_data: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeNode>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<TripleRow>>,
}

impl VersionDetail {
    /// Server id, if persisted
    #[must_use]
    pub const fn id(&self) -> Option<VersionId> {
        self.summary.id
    }

    /// The inline visualization, only when all three parts are present
    #[must_use]
    pub fn visualization(&self) -> Option<Visualization> {
        match (&self.graph, &self.tree, &self.table) {
            (Some(graph), Some(tree), Some(table)) if !graph.is_empty() => Some(Visualization {
                graph: graph.clone(),
                tree: tree.clone(),
                table: table.clone(),
            }),
            _ => None,
        }
    }
}

impl From<VersionSummary> for VersionDetail {
    fn from(summary: VersionSummary) -> Self {
        Self {
            summary,
            ontology_data: String::new(),
            graph: None,
            tree: None,
            table: None,
        }
    }
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInput {
    pub name: String,
    pub description: String,
    pub ontology_data: String,
}

/// One page of the version list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPage {
    pub items: Vec<VersionSummary>,
    pub total: u64,
    pub page_size: u64,
}

/// Three derived views of an ontology source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    /// Renderable markup (an HTML document)
    #[serde(default, deserialize_with = "null_as_default")]
    pub graph: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tree: TreeNode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub table: Vec<TripleRow>,
}

/// Node in the class hierarchy tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a node with children
    #[must_use]
    pub fn with_children(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            children,
            ..Self::default()
        }
    }

    /// Total number of nodes in this subtree, including self
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// All relations sharing one source in the triple table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleRow {
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: Vec<Relation>,
}

/// One predicate/object pair in the triple table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub relation: String,
    pub target: String,
}

/// Both serializations of a version, as served for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadBundle {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owl_data: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jsonld_data: String,
}

/// `GET /versions` body
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    #[serde(default)]
    pub versions: Vec<VersionSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pagination {
    pub total: u64,
    pub page_size: u64,
}

impl From<ListEnvelope> for VersionPage {
    fn from(envelope: ListEnvelope) -> Self {
        Self {
            items: envelope.versions,
            total: envelope.pagination.total,
            page_size: envelope.pagination.page_size,
        }
    }
}

/// `POST /visualize` body
#[derive(Debug, Serialize)]
pub(crate) struct ValidateRequest<'a> {
    pub ontology_data: &'a str,
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a field only if it has the expected shape
///
/// Stored versions may carry a visualization part as an empty string or
/// a stale shape; such values count as absent rather than failing the
/// whole response.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let value = match value {
        serde_json::Value::String(s) if s.trim().is_empty() => return Ok(None),
        // Some backends store the JSON parts as strings
        serde_json::Value::String(s) if s.trim_start().starts_with(['{', '[']) => {
            serde_json::from_str(&s).unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_with_full_visualization() {
        let json = r#"{
            "id": 3, "name": "pizza", "description": "menu",
            "ontology_data": "<rdf/>",
            "graph": "<html></html>",
            "tree": {"name": "Root", "children": [{"name": "Pizza", "children": []}]},
            "table": [{"source": "Pizza", "relations": [{"relation": "subClassOf", "target": "Food"}]}],
            "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-02T00:00:00"
        }"#;
        let detail: VersionDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id(), Some(3));
        assert_eq!(detail.ontology_data, "<rdf/>");

        let viz = detail.visualization().unwrap();
        assert_eq!(viz.tree.node_count(), 2);
        assert_eq!(viz.table[0].relations[0].target, "Food");
    }

    #[test]
    fn test_detail_with_partial_visualization_has_none() {
        let json = r#"{"id": 1, "name": "a", "description": null,
                       "ontology_data": "x", "graph": "<html/>", "tree": "", "table": null}"#;
        let detail: VersionDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.summary.description, "");
        assert!(detail.tree.is_none());
        assert!(detail.visualization().is_none());
    }

    #[test]
    fn test_detail_with_stringified_parts() {
        let json = r#"{"id": 1, "name": "a", "ontology_data": "x", "graph": "<g/>",
                       "tree": "{\"name\": \"Root\"}", "table": "[]"}"#;
        let detail: VersionDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.tree.as_ref().unwrap().name, "Root");
        assert!(detail.visualization().is_some());
    }

    #[test]
    fn test_list_envelope() {
        let json = r#"{"versions": [{"id": 1, "name": "a", "description": ""}],
                       "pagination": {"page": 1, "page_size": 20, "total": 1}}"#;
        let envelope: ListEnvelope = serde_json::from_str(json).unwrap();
        let page = VersionPage::from(envelope);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.page_size, 20);
    }

    #[test]
    fn test_summary_matches() {
        let v = VersionSummary::new(1, "Pizza Ontology", "Toppings and bases");
        assert!(v.matches(""));
        assert!(v.matches("pizza"));
        assert!(v.matches("TOPPING"));
        assert!(!v.matches("wine"));
    }

    #[test]
    fn test_input_serializes_wire_names() {
        let input = VersionInput {
            name: "n".into(),
            description: "d".into(),
            ontology_data: "<rdf/>".into(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["ontology_data"], "<rdf/>");
    }
}
