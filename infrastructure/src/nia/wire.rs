//! Nia API request and response bodies.
//!
//! Responses are decoded into these typed shapes first and only then
//! converted into the normalized port types, so a schema drift upstream
//! surfaces as [`SearchApiError::Decode`] instead of a half-filled payload.
//!
//! [`SearchApiError::Decode`]: niagate_application::ports::search_api::SearchApiError::Decode

use niagate_application::ports::search_api::{
    DirectoryListing, Document, GrepMatch, GrepResponse, SearchHit, SourceContent, SourceTree,
    WebResult, WebSearchResponse,
};
use niagate_domain::SearchTargets;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ==================== /query ====================

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub messages: Vec<ChatMessage<'a>>,
    pub search_mode: &'static str,
    pub include_sources: bool,
    #[serde(skip_serializing_if = "is_empty")]
    pub data_sources: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    pub repositories: &'a [String],
}

fn is_empty(ids: &&[String]) -> bool {
    ids.is_empty()
}

impl<'a> QueryRequest<'a> {
    pub fn new(query: &'a str, targets: &'a SearchTargets) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: "user",
                content: query,
            }],
            search_mode: "unified",
            include_sources: true,
            data_sources: &targets.data_sources,
            repositories: &targets.repositories,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub sources: Vec<QuerySource>,
}

#[derive(Debug, Deserialize)]
pub struct QuerySource {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

fn first_str(metadata: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| metadata.get(*k).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<QuerySource> for SearchHit {
    fn from(source: QuerySource) -> Self {
        let meta = &source.metadata;
        SearchHit {
            source: first_str(
                meta,
                &["source_id", "data_source_id", "repository", "source"],
            ),
            path: first_str(meta, &["file_path", "path", "document_path"]),
            url: first_str(meta, &["url", "source_url", "page_url"]),
            content: source.content,
        }
    }
}

// ==================== tree / ls / read ====================

#[derive(Debug, Deserialize)]
pub struct DataSourceTree {
    pub tree_string: String,
    #[serde(default)]
    pub page_count: u64,
    pub base_url: Option<String>,
}

impl From<DataSourceTree> for SourceTree {
    fn from(tree: DataSourceTree) -> Self {
        SourceTree {
            tree: tree.tree_string,
            item_count: tree.page_count,
            base_url: tree.base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RepositoryTree {
    pub tree_string: String,
    #[serde(default)]
    pub file_count: u64,
    pub base_url: Option<String>,
}

impl From<RepositoryTree> for SourceTree {
    fn from(tree: RepositoryTree) -> Self {
        SourceTree {
            tree: tree.tree_string,
            item_count: tree.file_count,
            base_url: tree.base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub path: Option<String>,
    #[serde(default)]
    pub directories: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub total: Option<u64>,
}

impl ListResponse {
    pub fn into_listing(self, requested_path: &str) -> DirectoryListing {
        let total = self
            .total
            .unwrap_or((self.directories.len() + self.files.len()) as u64);
        DirectoryListing {
            path: self.path.unwrap_or_else(|| requested_path.to_string()),
            directories: self.directories,
            files: self.files,
            total,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReadResponse {
    pub path: Option<String>,
    pub url: Option<String>,
    pub content: String,
}

impl ReadResponse {
    pub fn into_document(self, requested_path: &str) -> Document {
        Document {
            path: self.path.unwrap_or_else(|| requested_path.to_string()),
            url: self.url,
            content: self.content,
        }
    }
}

// ==================== grep ====================

#[derive(Debug, Deserialize)]
pub struct WireGrepMatch {
    #[serde(default, alias = "file_path")]
    pub path: Option<String>,
    #[serde(alias = "line_num")]
    pub line_number: u64,
    #[serde(alias = "content", alias = "text")]
    pub line: String,
    #[serde(default)]
    pub context_before: Vec<String>,
    #[serde(default)]
    pub context_after: Vec<String>,
}

impl WireGrepMatch {
    fn into_match(self, file: Option<&str>) -> GrepMatch {
        GrepMatch {
            path: self
                .path
                .or_else(|| file.map(str::to_string))
                .unwrap_or_default(),
            line_number: self.line_number,
            line: self.line,
            context_before: self.context_before,
            context_after: self.context_after,
        }
    }
}

/// Matches arrive either flat or keyed by file path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireGrepMatches {
    Flat(Vec<WireGrepMatch>),
    ByFile(BTreeMap<String, Vec<WireGrepMatch>>),
}

impl Default for WireGrepMatches {
    fn default() -> Self {
        WireGrepMatches::Flat(Vec::new())
    }
}

impl WireGrepMatches {
    fn flatten(self) -> Vec<GrepMatch> {
        match self {
            WireGrepMatches::Flat(matches) => {
                matches.into_iter().map(|m| m.into_match(None)).collect()
            }
            WireGrepMatches::ByFile(by_file) => by_file
                .into_iter()
                .flat_map(|(file, matches)| {
                    matches
                        .into_iter()
                        .map(|m| m.into_match(Some(file.as_str())))
                        .collect::<Vec<_>>()
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GrepWireResponse {
    #[serde(default)]
    pub matches: WireGrepMatches,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub pattern: String,
    pub path_filter: Option<String>,
    #[serde(default)]
    pub total_matches: u64,
    #[serde(default)]
    pub files_searched: u64,
    pub files_with_matches: Option<u64>,
    #[serde(default)]
    pub truncated: bool,
    pub options: Option<Value>,
}

impl GrepWireResponse {
    pub fn into_response(self, requested_pattern: &str) -> GrepResponse {
        let pattern = if self.pattern.is_empty() {
            requested_pattern.to_string()
        } else {
            self.pattern
        };
        GrepResponse {
            pattern,
            path_filter: self.path_filter,
            matches: self.matches.flatten(),
            files: self.files,
            counts: self.counts,
            total_matches: self.total_matches,
            files_searched: self.files_searched,
            files_with_matches: self.files_with_matches,
            truncated: self.truncated,
            options: self.options,
        }
    }
}

// ==================== web search ====================

#[derive(Debug, Deserialize)]
pub struct WebSearchWireResponse {
    #[serde(default)]
    pub github_repos: Vec<WebResult>,
    #[serde(default)]
    pub documentation: Vec<WebResult>,
    #[serde(default)]
    pub other_content: Vec<WebResult>,
    pub total_results: Option<u64>,
}

impl From<WebSearchWireResponse> for WebSearchResponse {
    fn from(wire: WebSearchWireResponse) -> Self {
        let total = wire.total_results.unwrap_or(
            (wire.github_repos.len() + wire.documentation.len() + wire.other_content.len()) as u64,
        );
        WebSearchResponse {
            github_repos: wire.github_repos,
            documentation: wire.documentation,
            other_content: wire.other_content,
            total,
        }
    }
}

// ==================== sources/content ====================

#[derive(Debug, Deserialize)]
pub struct SourceContentWireResponse {
    pub success: bool,
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(alias = "message")]
    pub error: Option<String>,
}

impl SourceContentWireResponse {
    /// `Err` carries the upstream explanation when `success` is false.
    pub fn into_content(self) -> Result<SourceContent, String> {
        if !self.success {
            return Err(self
                .error
                .unwrap_or_else(|| "Source content lookup failed".to_string()));
        }
        Ok(SourceContent {
            content: self.content.unwrap_or_default(),
            metadata: self.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_request_omits_empty_targets() {
        let targets = SearchTargets {
            data_sources: vec!["court-docs".to_string()],
            repositories: Vec::new(),
        };
        let body = serde_json::to_value(QueryRequest::new("who flew", &targets)).unwrap();
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["search_mode"], "unified");
        assert_eq!(body["data_sources"], json!(["court-docs"]));
        assert!(body.get("repositories").is_none());
    }

    #[test]
    fn test_search_hit_from_metadata() {
        let source: QuerySource = serde_json::from_value(json!({
            "content": "snippet",
            "metadata": {"file_path": "src/lib.rs", "repository": "tokio-rs/tokio"}
        }))
        .unwrap();
        let hit = SearchHit::from(source);
        assert_eq!(hit.path.as_deref(), Some("src/lib.rs"));
        assert_eq!(hit.source.as_deref(), Some("tokio-rs/tokio"));
        assert_eq!(hit.url, None);
    }

    #[test]
    fn test_grep_matches_keyed_by_file() {
        let wire: GrepWireResponse = serde_json::from_value(json!({
            "matches": {"a.md": [{"line_number": 3, "line": "foo"}]},
            "total_matches": 1
        }))
        .unwrap();
        let response = wire.into_response("foo");
        assert_eq!(response.pattern, "foo");
        assert_eq!(response.matches[0].path, "a.md");
        assert_eq!(response.matches[0].line_number, 3);
    }

    #[test]
    fn test_source_content_failure() {
        let wire: SourceContentWireResponse =
            serde_json::from_value(json!({"success": false, "error": "not indexed"})).unwrap();
        assert_eq!(wire.into_content().unwrap_err(), "not indexed");
    }
}
