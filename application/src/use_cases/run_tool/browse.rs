//! `browse` tool: hierarchical listing of a whole source.

use super::{ToolContext, ToolOutput, to_payload};
use niagate_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolError,
};
use niagate_domain::SourceKind;
use serde::Serialize;

pub const BROWSE: &str = "browse";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        BROWSE,
        "Show the file tree of a source. Use it to learn how a source is organized before \
         listing directories or reading documents.",
    )
    .with_parameter(ToolParameter::new(
        "source",
        "Source identifier or subtree name (defaults to the first configured source)",
        false,
    ))
}

#[derive(Debug, Serialize)]
struct BrowseOutput {
    source: String,
    source_kind: SourceKind,
    tree: String,
    item_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
}

pub async fn execute(ctx: &ToolContext<'_>, call: &ToolCall) -> Result<ToolOutput, ToolError> {
    let target = ctx.sources.resolve_source(call.get_string("source"))?;
    let tree = ctx.api.tree(&target).await?;

    let payload = to_payload(&BrowseOutput {
        source: target.id.clone(),
        source_kind: target.kind,
        tree: tree.tree,
        item_count: tree.item_count,
        base_url: tree.base_url,
    })?;
    Ok(ToolOutput::new(payload).with_source(target.id))
}
