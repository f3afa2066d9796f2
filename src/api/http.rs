//! REST client for the version service
//!
//! Blocking `reqwest` client; the console runs it on a worker thread so
//! the interface keeps rendering while a call is in flight.

use super::error::{ApiError, ApiResult, ErrorBody};
use super::traits::VersionRepository;
use super::types::{
    DownloadBundle, ListEnvelope, ValidateRequest, VersionDetail, VersionId, VersionInput,
    VersionPage, Visualization,
};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("ontoctl/", env!("CARGO_PKG_VERSION"));

/// Version service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpRepository {
    client: Client,
    base: Url,
}

impl HttpRepository {
    /// Create a client for the given base URL (e.g. `http://localhost:5000/api`)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the URL is invalid or the client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base = parse_base(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, base })
    }

    /// The base URL all paths are resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid request path '{path}': {e}")))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        decode_response(status, &body)
    }
}

/// Normalize the base so relative joins keep its last path segment
fn parse_base(base_url: &str) -> ApiResult<Url> {
    let mut normalized = base_url.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized)
        .map_err(|e| ApiError::Transport(format!("invalid API url '{base_url}': {e}")))
}

/// Interpret a status code and body the way every endpoint shares
///
/// # Errors
///
/// Non-2xx statuses map through [`ApiError::from_status`]; a 2xx body
/// that does not parse is `ApiError::Decode`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if (200..300).contains(&status) {
        // Some endpoints answer 2xx with an empty body
        let body = if body.trim().is_empty() { "null" } else { body };
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    let error_body: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    Err(ApiError::from_status(status, error_body))
}

impl VersionRepository for HttpRepository {
    fn list(&self, page: u32, search: &str) -> ApiResult<VersionPage> {
        let url = self.url("versions")?;
        debug!(%url, page, search, "listing versions");
        let request = self
            .client
            .get(url)
            .query(&[("page", page.to_string().as_str()), ("search", search)]);
        let envelope: ListEnvelope = self.send(request)?;
        Ok(envelope.into())
    }

    fn get(&self, id: VersionId) -> ApiResult<VersionDetail> {
        let url = self.url(&format!("versions/{id}"))?;
        debug!(%url, "fetching version");
        self.send(self.client.get(url))
    }

    fn create(&self, input: &VersionInput) -> ApiResult<VersionDetail> {
        let url = self.url("versions")?;
        debug!(%url, name = %input.name, "creating version");
        self.send(self.client.post(url).json(input))
    }

    fn update(&self, id: VersionId, input: &VersionInput) -> ApiResult<VersionDetail> {
        let url = self.url(&format!("versions/{id}"))?;
        debug!(%url, name = %input.name, "updating version");
        self.send(self.client.put(url).json(input))
    }

    fn delete(&self, id: VersionId) -> ApiResult<()> {
        let url = self.url(&format!("versions/{id}"))?;
        debug!(%url, "deleting version");
        let _confirmation: serde_json::Value = self.send(self.client.delete(url))?;
        Ok(())
    }

    fn validate(&self, ontology_data: &str) -> ApiResult<Visualization> {
        let url = self.url("visualize")?;
        debug!(%url, bytes = ontology_data.len(), "requesting visualization");
        self.send(self.client.post(url).json(&ValidateRequest { ontology_data }))
    }

    fn download(&self, id: VersionId) -> ApiResult<DownloadBundle> {
        let url = self.url(&format!("download/{id}"))?;
        debug!(%url, "downloading version");
        self.send(self.client.get(url))
    }
}
