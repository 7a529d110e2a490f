//! `web_search` tool: open-web search through the upstream service.

use super::{ToolContext, ToolOutput, to_payload};
use crate::ports::search_api::WebResult;
use niagate_domain::search::web::{DAYS_BACK, NUM_RESULTS};
use niagate_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolError,
};
use niagate_domain::{WebCategory, WebSearchOptions};
use serde::Serialize;

pub const WEB_SEARCH: &str = "web_search";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        WEB_SEARCH,
        "Search the open web. Use sparingly: only when the indexed sources cannot answer \
         the question, and prefer a single well-formed query over several narrow ones.",
    )
    .with_parameter(ToolParameter::new("query", "What to search for", true))
    .with_parameter(
        ToolParameter::new("num_results", "Number of results to return", false)
            .with_type(ParamType::Integer)
            .with_range(NUM_RESULTS.min as i64, NUM_RESULTS.max as i64),
    )
    .with_parameter(
        ToolParameter::new("category", "Restrict results to one content category", false)
            .with_allowed_values(WebCategory::names()),
    )
    .with_parameter(
        ToolParameter::new("days_back", "Only include content published this recently", false)
            .with_type(ParamType::Integer)
            .with_range(DAYS_BACK.min as i64, DAYS_BACK.max as i64),
    )
    .with_parameter(ToolParameter::new(
        "find_similar_to",
        "URL to find similar pages to",
        false,
    ))
}

#[derive(Debug, Serialize)]
struct WebSearchOutput {
    query: String,
    github_repos: Vec<WebResult>,
    documentation: Vec<WebResult>,
    other_content: Vec<WebResult>,
    total: u64,
}

pub fn options_from_call(call: &ToolCall) -> Result<WebSearchOptions, ToolError> {
    let query = call.require_string("query").map_err(ToolError::invalid_argument)?;
    let mut options = WebSearchOptions::new(query)?;

    if let Some(n) = call.get_i64("num_results") {
        options = options.with_num_results(n);
    }
    if let Some(category) = call.get_string("category") {
        options = options.with_category(category.parse::<WebCategory>()?);
    }
    if let Some(days) = call.get_i64("days_back") {
        options = options.with_days_back(days);
    }
    if let Some(url) = call.get_string("find_similar_to").filter(|u| !u.trim().is_empty()) {
        options = options.with_find_similar_to(url);
    }
    Ok(options)
}

pub async fn execute(ctx: &ToolContext<'_>, call: &ToolCall) -> Result<ToolOutput, ToolError> {
    let options = options_from_call(call)?;
    let response = ctx.api.web_search(&options).await?;
    let total = response.total;

    let payload = to_payload(&WebSearchOutput {
        query: options.query,
        github_repos: response.github_repos,
        documentation: response.documentation,
        other_content: response.other_content,
        total,
    })?;
    Ok(ToolOutput::new(payload).with_match_count(total as usize))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::ports::tool_executor::ToolExecutorPort;
    use niagate_domain::SourceCatalog;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_web_search_defaults() {
        let api = Arc::new(MockSearchApi::default());
        // Web search does not depend on configured sources
        let proxy = proxy(api.clone(), SourceCatalog::new());

        let result = proxy
            .execute(&ToolCall::new("web").with_arg("query", "tokio runtime"))
            .await;
        let output = result.output().unwrap();
        assert_eq!(output["total"], 1);
        assert_eq!(output["github_repos"][0]["title"], "tokio");

        let sent = api.last_web.lock().unwrap().clone().unwrap();
        assert_eq!(sent.num_results, 5);
        assert_eq!(sent.category, None);
    }

    #[tokio::test]
    async fn test_category_and_clamping() {
        let api = Arc::new(MockSearchApi::default());
        let proxy = proxy(api.clone(), SourceCatalog::new());

        let result = proxy
            .execute(
                &ToolCall::new("web_search")
                    .with_arg("query", "attention is all you need")
                    .with_arg("category", "research paper")
                    .with_arg("num_results", 50),
            )
            .await;
        assert!(result.is_success());

        let sent = api.last_web.lock().unwrap().clone().unwrap();
        assert_eq!(sent.num_results, 10);
        assert_eq!(sent.category, Some(WebCategory::ResearchPaper));
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let api = Arc::new(MockSearchApi::default());
        let proxy = proxy(api.clone(), SourceCatalog::new());

        let result = proxy
            .execute(
                &ToolCall::new("web_search")
                    .with_arg("query", "x")
                    .with_arg("category", "blog"),
            )
            .await;
        assert_eq!(result.error().unwrap().code, ToolError::INVALID_ARGUMENT);
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_description_discourages_overuse() {
        assert!(definition().description.contains("sparingly"));
    }
}
