//! Reqwest adapter for the [`SearchApiPort`].

use super::wire::{
    DataSourceTree, GrepWireResponse, ListResponse, QueryRequest, QueryResponse, ReadResponse,
    RepositoryTree, SourceContentWireResponse, WebSearchWireResponse,
};
use async_trait::async_trait;
use niagate_application::ports::search_api::{
    DirectoryListing, Document, GrepResponse, SearchApiError, SearchApiPort, SearchHit,
    SourceContent, SourceContentRequest, SourceTree, WebSearchResponse,
};
use niagate_domain::{GrepOptions, SearchTargets, SourceKind, SourceTarget, WebSearchOptions};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default Nia API base URL
pub const DEFAULT_BASE_URL: &str = "https://apigcp.trynia.ai/v2";

/// Default overall request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const MISSING_KEY: &str =
    "NIA_API_KEY is not set (configure api.api_key or the NIA_API_KEY environment variable)";

/// Authenticated client for the Nia search API.
///
/// A missing credential is not a construction error: the first call that
/// needs it fails with [`SearchApiError::Config`] instead, so the catalogue
/// can still be listed without one.
#[derive(Debug, Clone)]
pub struct NiaClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl NiaClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SearchApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SearchApiError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchApiError::Config(format!(
                "Invalid base URL '{}'",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SearchApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn source_endpoint(&self, target: &SourceTarget, action: &str) -> Url {
        let family = match target.kind {
            SourceKind::DataSource => "data-sources",
            SourceKind::Repository => "repositories",
        };
        self.endpoint(&[family, target.id.as_str(), action])
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, SearchApiError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchApiError::Config(MISSING_KEY.to_string()))?;
        Ok(request.bearer_auth(key))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, SearchApiError> {
        let request = self.authorized(request)?;
        debug!("Nia request: {}", url.path());

        let response = request
            .send()
            .await
            .map_err(|e| SearchApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(SearchApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| SearchApiError::Decode {
            endpoint: url.path().to_string(),
            message: e.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, SearchApiError> {
        let request = self.http.get(url.clone()).query(query);
        self.send(request, &url).await
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, SearchApiError> {
        let request = self.http.post(url.clone()).json(body);
        self.send(request, &url).await
    }
}

#[async_trait]
impl SearchApiPort for NiaClient {
    async fn query(
        &self,
        query: &str,
        targets: &SearchTargets,
    ) -> Result<Vec<SearchHit>, SearchApiError> {
        let url = self.endpoint(&["query"]);
        let response: QueryResponse = self.post(url, &QueryRequest::new(query, targets)).await?;
        Ok(response.sources.into_iter().map(SearchHit::from).collect())
    }

    async fn tree(&self, target: &SourceTarget) -> Result<SourceTree, SearchApiError> {
        let url = self.source_endpoint(target, "tree");
        match target.kind {
            SourceKind::DataSource => Ok(self.get::<DataSourceTree>(url, &[]).await?.into()),
            SourceKind::Repository => Ok(self.get::<RepositoryTree>(url, &[]).await?.into()),
        }
    }

    async fn list_directory(
        &self,
        data_source: &str,
        path: &str,
    ) -> Result<DirectoryListing, SearchApiError> {
        let url = self.endpoint(&["data-sources", data_source, "ls"]);
        let response: ListResponse = self.get(url, &[("path", path)]).await?;
        Ok(response.into_listing(path))
    }

    async fn read(&self, target: &SourceTarget, path: &str) -> Result<Document, SearchApiError> {
        let action = match target.kind {
            SourceKind::DataSource => "read",
            SourceKind::Repository => "content",
        };
        let url = self.source_endpoint(target, action);
        let response: ReadResponse = self.get(url, &[("path", path)]).await?;
        Ok(response.into_document(path))
    }

    async fn grep(
        &self,
        target: &SourceTarget,
        options: &GrepOptions,
    ) -> Result<GrepResponse, SearchApiError> {
        let url = self.source_endpoint(target, "grep");
        let response: GrepWireResponse = self.post(url, options).await?;
        Ok(response.into_response(&options.pattern))
    }

    async fn web_search(
        &self,
        options: &WebSearchOptions,
    ) -> Result<WebSearchResponse, SearchApiError> {
        let url = self.endpoint(&["web-search"]);
        let response: WebSearchWireResponse = self.post(url, options).await?;
        Ok(response.into())
    }

    async fn source_content(
        &self,
        request: &SourceContentRequest,
    ) -> Result<SourceContent, SearchApiError> {
        let url = self.endpoint(&["sources", "content"]);
        let response: SourceContentWireResponse = self.post(url, request).await?;
        response.into_content().map_err(SearchApiError::Rejected)
    }
}
