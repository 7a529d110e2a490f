//! Search API port
//!
//! Defines the interface to the external semantic-search service. Each
//! method is one HTTP round-trip; the adapter owns the base URL, the
//! credential and the wire schemas, and hands back the normalized types
//! below.

use async_trait::async_trait;
use niagate_domain::tool::value_objects::ToolError;
use niagate_domain::{GrepOptions, SearchTargets, SourceTarget, WebSearchOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while talking to the search API
#[derive(Error, Debug)]
pub enum SearchApiError {
    /// A credential or setting needed for the call is missing
    #[error("{0}")]
    Config(String),

    /// Non-success HTTP status; `body` is the upstream response text
    #[error("{body}")]
    Api { status: u16, body: String },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Network(String),

    /// The response did not match the expected schema
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// 2xx response that reports failure in its body
    #[error("{0}")]
    Rejected(String),
}

impl From<SearchApiError> for ToolError {
    fn from(error: SearchApiError) -> Self {
        match &error {
            SearchApiError::Config(_) => ToolError::config(error.to_string()),
            SearchApiError::Api { status, .. } => {
                ToolError::upstream(error.to_string()).with_details(format!("HTTP {}", status))
            }
            SearchApiError::Network(_)
            | SearchApiError::Decode { .. }
            | SearchApiError::Rejected(_) => {
                ToolError::upstream(error.to_string())
            }
        }
    }
}

/// One ranked snippet from a semantic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Serialized hierarchy of a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTree {
    pub tree: String,
    /// Pages for data sources, files for repositories
    pub item_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub path: String,
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrepMatch {
    pub path: String,
    pub line_number: u64,
    pub line: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_before: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_after: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrepResponse {
    pub pattern: String,
    pub path_filter: Option<String>,
    pub matches: Vec<GrepMatch>,
    pub files: Vec<String>,
    pub counts: BTreeMap<String, u64>,
    pub total_matches: u64,
    pub files_searched: u64,
    pub files_with_matches: Option<u64>,
    pub truncated: bool,
    pub options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResponse {
    pub github_repos: Vec<WebResult>,
    pub documentation: Vec<WebResult>,
    pub other_content: Vec<WebResult>,
    pub total: u64,
}

/// Kind of source a content lookup addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceContentType {
    Repository,
    Documentation,
}

impl SourceContentType {
    pub const NAMES: [&'static str; 2] = ["repository", "documentation"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "repository" => Some(Self::Repository),
            "documentation" => Some(Self::Documentation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContentRequest {
    pub source_type: SourceContentType,
    pub source_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContent {
    pub content: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Port for the external search API
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait SearchApiPort: Send + Sync {
    /// Semantic search over the given targets
    async fn query(
        &self,
        query: &str,
        targets: &SearchTargets,
    ) -> Result<Vec<SearchHit>, SearchApiError>;

    /// Hierarchical listing of a whole source
    async fn tree(&self, target: &SourceTarget) -> Result<SourceTree, SearchApiError>;

    /// One directory of a data source
    async fn list_directory(
        &self,
        data_source: &str,
        path: &str,
    ) -> Result<DirectoryListing, SearchApiError>;

    /// Full text of one document
    async fn read(&self, target: &SourceTarget, path: &str) -> Result<Document, SearchApiError>;

    /// Regex or literal search inside a source
    async fn grep(
        &self,
        target: &SourceTarget,
        options: &GrepOptions,
    ) -> Result<GrepResponse, SearchApiError>;

    /// Search the open web
    async fn web_search(
        &self,
        options: &WebSearchOptions,
    ) -> Result<WebSearchResponse, SearchApiError>;

    /// Fetch a source by identifier found in an earlier result
    async fn source_content(
        &self,
        request: &SourceContentRequest,
    ) -> Result<SourceContent, SearchApiError>;
}
