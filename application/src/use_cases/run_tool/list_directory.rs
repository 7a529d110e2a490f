//! `list_directory` tool: one directory of a data source.

use super::{ToolContext, ToolOutput, to_payload};
use niagate_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolError,
};
use serde::Serialize;

pub const LIST_DIRECTORY: &str = "list_directory";

const ROOT: &str = "/";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_DIRECTORY,
        "List the directories and documents at one virtual path of a data source.",
    )
    .with_parameter(ToolParameter::new(
        "path",
        "Virtual directory path (defaults to the root)",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "source",
        "Data source identifier (defaults to the first configured data source)",
        false,
    ))
}

#[derive(Debug, Serialize)]
struct ListDirectoryOutput {
    source: String,
    path: String,
    directories: Vec<String>,
    files: Vec<String>,
    total: u64,
}

pub async fn execute(ctx: &ToolContext<'_>, call: &ToolCall) -> Result<ToolOutput, ToolError> {
    let target = ctx.sources.resolve_data_source(call.get_string("source"))?;
    let path = call
        .get_string("path")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(ROOT);

    let listing = ctx.api.list_directory(&target.id, path).await?;
    let total = listing.total;

    let payload = to_payload(&ListDirectoryOutput {
        source: target.id.clone(),
        path: listing.path,
        directories: listing.directories,
        files: listing.files,
        total,
    })?;
    Ok(ToolOutput::new(payload)
        .with_source(target.id)
        .with_match_count(total as usize))
}
