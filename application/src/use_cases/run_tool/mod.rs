//! Run Tool use case: the tool proxy layer.
//!
//! [`ToolProxy`] implements [`ToolExecutorPort`] on top of a
//! [`SearchApiPort`]. Every call goes through the same pipeline:
//!
//! ```text
//! ToolCall
//!   ├─ resolve name (aliases)          → NOT_FOUND
//!   ├─ validate against definition     → INVALID_ARGUMENT
//!   ├─ tool-specific resolution        → INVALID_ARGUMENT / CONFIG_ERROR
//!   │    (scopes, sources, clamping)
//!   ├─ one SearchApiPort call          → UPSTREAM_ERROR / CONFIG_ERROR
//!   └─ normalize                       → ToolResult::success(payload)
//! ```
//!
//! Everything above the port call is pure, so a rejected call never
//! reaches the network. Nothing is retried here; retry policy belongs to
//! the orchestration runtime.

pub mod browse;
pub mod get_source_content;
pub mod grep;
pub mod list_directory;
pub mod read_document;
pub mod search;
pub mod web_search;

use crate::ports::search_api::SearchApiPort;
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use niagate_domain::core::string::truncate;
use niagate_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use niagate_domain::SourceCatalog;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Maximum characters of a payload written to the log
const PREVIEW_LEN: usize = 500;

/// What a tool needs besides its arguments.
pub struct ToolContext<'a> {
    pub api: &'a dyn SearchApiPort,
    pub sources: &'a SourceCatalog,
}

/// Successful tool payload plus the metadata worth reporting.
pub struct ToolOutput {
    pub payload: Value,
    pub source: Option<String>,
    pub match_count: Option<usize>,
}

impl ToolOutput {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            source: None,
            match_count: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_match_count(mut self, count: usize) -> Self {
        self.match_count = Some(count);
        self
    }
}

/// Serialize a normalized output struct into a payload.
pub(crate) fn to_payload<T: serde::Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value)
        .map_err(|e| ToolError::upstream(format!("Failed to encode tool output: {}", e)))
}

/// The full tool catalogue with aliases.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(search::definition())
        .register(browse::definition())
        .register(list_directory::definition())
        .register(read_document::definition())
        .register(grep::definition())
        .register(web_search::definition())
        .register(get_source_content::definition())
        .register_aliases([
            ("semantic_search", search::SEARCH),
            ("tree", browse::BROWSE),
            ("ls", list_directory::LIST_DIRECTORY),
            ("read", read_document::READ_DOCUMENT),
            ("cat", read_document::READ_DOCUMENT),
            ("regex_search", grep::GREP),
            ("web", web_search::WEB_SEARCH),
            ("fetch_source", get_source_content::GET_SOURCE_CONTENT),
        ])
}

/// Tool executor backed by the search API.
pub struct ToolProxy {
    api: Arc<dyn SearchApiPort>,
    sources: SourceCatalog,
    tool_spec: ToolSpec,
}

impl ToolProxy {
    pub fn new(api: Arc<dyn SearchApiPort>, sources: SourceCatalog) -> Self {
        Self {
            api,
            sources,
            tool_spec: default_tool_spec(),
        }
    }

    pub fn sources(&self) -> &SourceCatalog {
        &self.sources
    }

    async fn dispatch(&self, canonical: &str, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        let ctx = ToolContext {
            api: self.api.as_ref(),
            sources: &self.sources,
        };
        match canonical {
            search::SEARCH => search::execute(&ctx, call).await,
            browse::BROWSE => browse::execute(&ctx, call).await,
            list_directory::LIST_DIRECTORY => list_directory::execute(&ctx, call).await,
            read_document::READ_DOCUMENT => read_document::execute(&ctx, call).await,
            grep::GREP => grep::execute(&ctx, call).await,
            web_search::WEB_SEARCH => web_search::execute(&ctx, call).await,
            get_source_content::GET_SOURCE_CONTENT => get_source_content::execute(&ctx, call).await,
            other => Err(ToolError::unknown_tool(other)),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for ToolProxy {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();
        let correlation_id = call
            .correlation_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let Some(definition) = self.tool_spec.get_resolved(&call.tool_name) else {
            warn!(call = %correlation_id, "Unknown tool '{}'", call.tool_name);
            return ToolResult::failure(
                &call.tool_name,
                ToolError::unknown_tool(&call.tool_name),
            )
            .with_correlation_id(correlation_id);
        };
        let canonical = definition.name.clone();

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            warn!(call = %correlation_id, tool = %canonical, "Invalid tool call: {}", e);
            return ToolResult::failure(&canonical, ToolError::invalid_argument(e))
                .with_correlation_id(correlation_id);
        }

        debug!(
            call = %correlation_id,
            tool = %canonical,
            "Tool input: {}",
            truncate(&serde_json::to_string(&call.arguments).unwrap_or_default(), PREVIEW_LEN)
        );

        let result = match self.dispatch(&canonical, call).await {
            Ok(output) => {
                debug!(
                    call = %correlation_id,
                    tool = %canonical,
                    "Tool output: {}",
                    truncate(&output.payload.to_string(), PREVIEW_LEN)
                );
                ToolResult::success(&canonical, output.payload).with_metadata(ToolResultMetadata {
                    source: output.source,
                    match_count: output.match_count,
                    ..Default::default()
                })
            }
            Err(error) => {
                warn!(call = %correlation_id, tool = %canonical, "Tool failed: {}", error);
                ToolResult::failure(&canonical, error)
            }
        };

        result
            .with_duration(start.elapsed().as_millis() as u64)
            .with_correlation_id(correlation_id)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Recording mock of the search API shared by the tool tests.

    use super::*;
    use crate::ports::search_api::*;
    use niagate_domain::{GrepOptions, SearchTargets, SourceTarget, Subtree, WebSearchOptions};
    use std::sync::Mutex;

    /// Mock search API that records every call and replays canned responses
    #[derive(Default)]
    pub struct MockSearchApi {
        pub calls: Mutex<Vec<String>>,
        pub hits: Vec<SearchHit>,
        pub grep: Option<GrepResponse>,
        pub fail_with: Option<(u16, String)>,
        pub last_grep: Mutex<Option<GrepOptions>>,
        pub last_targets: Mutex<Option<SearchTargets>>,
        pub last_web: Mutex<Option<WebSearchOptions>>,
    }

    impl MockSearchApi {
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn record(&self, call: String) -> Result<(), SearchApiError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some((status, body)) => Err(SearchApiError::Api {
                    status: *status,
                    body: body.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl SearchApiPort for MockSearchApi {
        async fn query(
            &self,
            query: &str,
            targets: &SearchTargets,
        ) -> Result<Vec<SearchHit>, SearchApiError> {
            self.record(format!("query:{}", query))?;
            *self.last_targets.lock().unwrap() = Some(targets.clone());
            Ok(self.hits.clone())
        }

        async fn tree(&self, target: &SourceTarget) -> Result<SourceTree, SearchApiError> {
            self.record(format!("tree:{}", target.id))?;
            Ok(SourceTree {
                tree: "docs/\n  a.md".to_string(),
                item_count: 1,
                base_url: None,
            })
        }

        async fn list_directory(
            &self,
            data_source: &str,
            path: &str,
        ) -> Result<DirectoryListing, SearchApiError> {
            self.record(format!("ls:{}:{}", data_source, path))?;
            Ok(DirectoryListing {
                path: path.to_string(),
                directories: vec!["2019".to_string()],
                files: vec!["index.md".to_string()],
                total: 2,
            })
        }

        async fn read(
            &self,
            target: &SourceTarget,
            path: &str,
        ) -> Result<Document, SearchApiError> {
            self.record(format!("read:{}:{}", target.id, path))?;
            Ok(Document {
                path: path.to_string(),
                url: Some(format!("https://example.org/{}", path)),
                content: "full text".to_string(),
            })
        }

        async fn grep(
            &self,
            target: &SourceTarget,
            options: &GrepOptions,
        ) -> Result<GrepResponse, SearchApiError> {
            self.record(format!("grep:{}", target.id))?;
            *self.last_grep.lock().unwrap() = Some(options.clone());
            Ok(self.grep.clone().unwrap_or(GrepResponse {
                pattern: options.pattern.clone(),
                path_filter: options.path.clone(),
                matches: Vec::new(),
                files: Vec::new(),
                counts: Default::default(),
                total_matches: 0,
                files_searched: 0,
                files_with_matches: None,
                truncated: false,
                options: None,
            }))
        }

        async fn web_search(
            &self,
            options: &WebSearchOptions,
        ) -> Result<WebSearchResponse, SearchApiError> {
            self.record(format!("web:{}", options.query))?;
            *self.last_web.lock().unwrap() = Some(options.clone());
            Ok(WebSearchResponse {
                github_repos: vec![WebResult {
                    url: "https://github.com/tokio-rs/tokio".to_string(),
                    title: Some("tokio".to_string()),
                    summary: None,
                    published_date: None,
                }],
                documentation: Vec::new(),
                other_content: Vec::new(),
                total: 1,
            })
        }

        async fn source_content(
            &self,
            request: &SourceContentRequest,
        ) -> Result<SourceContent, SearchApiError> {
            self.record(format!("content:{}", request.source_identifier))?;
            Ok(SourceContent {
                content: "fn main() {}".to_string(),
                metadata: serde_json::Map::new(),
            })
        }
    }

    pub fn archive_catalog() -> SourceCatalog {
        SourceCatalog::new()
            .with_archive(["court-docs", "flight-logs"])
            .with_docs(["press"])
    }

    pub fn subtree_catalog() -> SourceCatalog {
        SourceCatalog::new().with_subtree(Subtree {
            org: "chromium".to_string(),
            dataset: "chromium".to_string(),
            branch: "main".to_string(),
            scopes: vec!["base".to_string(), "net".to_string()],
        })
    }

    pub fn proxy(api: Arc<MockSearchApi>, sources: SourceCatalog) -> ToolProxy {
        ToolProxy::new(api, sources)
    }
}
