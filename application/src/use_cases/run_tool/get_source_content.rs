//! `get_source_content` tool: fetch a source found by an earlier result.

use super::{ToolContext, ToolOutput, to_payload};
use crate::ports::search_api::{SourceContentRequest, SourceContentType};
use niagate_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolError,
};
use serde::Serialize;

pub const GET_SOURCE_CONTENT: &str = "get_source_content";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_SOURCE_CONTENT,
        "Fetch the full content of a repository file or documentation page using the \
         identifier returned by search or web_search.",
    )
    .with_parameter(
        ToolParameter::new("source_type", "Kind of source", true)
            .with_allowed_values(SourceContentType::NAMES),
    )
    .with_parameter(ToolParameter::new(
        "source_identifier",
        "Identifier from a previous result (e.g. owner/repo:path or a page URL)",
        true,
    ))
    .with_parameter(
        ToolParameter::new("metadata", "Extra lookup hints from the previous result", false)
            .with_type(ParamType::Object),
    )
}

#[derive(Debug, Serialize)]
struct SourceContentOutput {
    source_type: SourceContentType,
    source_identifier: String,
    content: String,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    metadata: serde_json::Map<String, serde_json::Value>,
}

pub async fn execute(ctx: &ToolContext<'_>, call: &ToolCall) -> Result<ToolOutput, ToolError> {
    let raw_type = call
        .require_string("source_type")
        .map_err(ToolError::invalid_argument)?;
    let source_type = SourceContentType::parse(raw_type).ok_or_else(|| {
        ToolError::invalid_argument(format!(
            "source_type must be one of: {} (got '{}')",
            SourceContentType::NAMES.join(", "),
            raw_type
        ))
    })?;
    let identifier = call
        .require_string("source_identifier")
        .map_err(ToolError::invalid_argument)?
        .trim();
    if identifier.is_empty() {
        return Err(ToolError::invalid_argument(
            "source_identifier must not be empty",
        ));
    }

    let request = SourceContentRequest {
        source_type,
        source_identifier: identifier.to_string(),
        metadata: call.get_object("metadata").cloned(),
    };
    let content = ctx.api.source_content(&request).await?;

    let payload = to_payload(&SourceContentOutput {
        source_type,
        source_identifier: request.source_identifier.clone(),
        content: content.content,
        metadata: content.metadata,
    })?;
    Ok(ToolOutput::new(payload).with_source(request.source_identifier))
}
