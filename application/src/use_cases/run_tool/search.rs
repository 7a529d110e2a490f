//! `search` tool: semantic search across the configured sources.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `query` | string | Yes | Natural-language question or keywords |
//! | `scope` | string | No | Source category or subtree name |
//! | `include_docs` | boolean | No | Also search documentation sources |
//!
//! Unknown scopes are rejected with the list of valid ones before any
//! request is made.

use super::{ToolContext, ToolOutput, to_payload};
use crate::ports::search_api::SearchHit;
use niagate_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolError,
};
use serde::Serialize;

pub const SEARCH: &str = "search";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH,
        "Semantic search over the indexed sources. Returns ranked snippets with their \
         source, path and URL. Start here, then use read_document or grep to dig into a hit.",
    )
    .with_parameter(ToolParameter::new("query", "What to search for", true))
    .with_parameter(ToolParameter::new(
        "scope",
        "Narrow the search to one source category (archive, biography, docs, repositories, all) \
         or one named subtree",
        false,
    ))
    .with_parameter(
        ToolParameter::new("include_docs", "Also search documentation sources", false)
            .with_type(ParamType::Boolean),
    )
}

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    results: Vec<SearchHit>,
    count: usize,
}

pub async fn execute(ctx: &ToolContext<'_>, call: &ToolCall) -> Result<ToolOutput, ToolError> {
    let query = call.require_string("query").map_err(ToolError::invalid_argument)?;
    if query.trim().is_empty() {
        return Err(ToolError::invalid_argument("query must not be empty"));
    }
    let scope = call.get_string("scope");
    let include_docs = call.get_bool("include_docs").unwrap_or(false);

    let targets = ctx.sources.resolve_scope(scope, include_docs)?;
    let results = ctx.api.query(query, &targets).await?;
    let count = results.len();

    let payload = to_payload(&SearchOutput {
        query,
        scope,
        results,
        count,
    })?;
    Ok(ToolOutput::new(payload).with_match_count(count))
}
