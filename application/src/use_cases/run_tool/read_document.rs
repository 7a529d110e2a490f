//! `read_document` tool: full text of one document or file.

use super::{ToolContext, ToolOutput, to_payload};
use niagate_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolError,
};
use serde::Serialize;

pub const READ_DOCUMENT: &str = "read_document";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_DOCUMENT,
        "Read the full content of a document (data sources) or file (repositories). \
         Returns the text and the URL it can be cited by.",
    )
    .with_parameter(ToolParameter::new("path", "Virtual path of the document", true))
    .with_parameter(ToolParameter::new(
        "source",
        "Source identifier or subtree name (defaults to the first configured source)",
        false,
    ))
}

#[derive(Debug, Serialize)]
struct ReadDocumentOutput {
    source: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    content: String,
}

pub async fn execute(ctx: &ToolContext<'_>, call: &ToolCall) -> Result<ToolOutput, ToolError> {
    let path = call.require_string("path").map_err(ToolError::invalid_argument)?;
    if path.trim().is_empty() {
        return Err(ToolError::invalid_argument("path must not be empty"));
    }
    let target = ctx.sources.resolve_source(call.get_string("source"))?;

    let document = ctx.api.read(&target, path).await?;

    let payload = to_payload(&ReadDocumentOutput {
        source: target.id.clone(),
        path: document.path,
        url: document.url,
        content: document.content,
    })?;
    Ok(ToolOutput::new(payload).with_source(target.id))
}
