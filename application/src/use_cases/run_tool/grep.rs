//! `grep` tool: regex or literal search inside one source.
//!
//! Numeric caps are clamped into range instead of rejected, and matches
//! outside the `path` prefix are dropped before the payload is built.

use super::{ToolContext, ToolOutput, to_payload};
use crate::ports::search_api::GrepMatch;
use niagate_domain::search::grep::{
    CONTEXT_LINES, LINES_BEFORE_AFTER, MAX_MATCHES_PER_FILE, MAX_TOTAL_MATCHES,
};
use niagate_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolError,
};
use niagate_domain::{GrepOptions, GrepOutputMode};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const GREP: &str = "grep";

fn bool_param(name: &str, description: &str) -> ToolParameter {
    ToolParameter::new(name, description, false).with_type(ParamType::Boolean)
}

fn int_param(name: &str, description: &str, min: u32, max: u32) -> ToolParameter {
    ToolParameter::new(name, description, false)
        .with_type(ParamType::Integer)
        .with_range(min as i64, max as i64)
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        GREP,
        "Search for a regular expression or literal string inside one source. \
         Use it for exact names, quotes and identifiers that semantic search misses.",
    )
    .with_parameter(ToolParameter::new("pattern", "Regex (or literal with fixed_string)", true))
    .with_parameter(ToolParameter::new(
        "path",
        "Only report matches under this path prefix",
        false,
    ))
    .with_parameter(bool_param("case_sensitive", "Match case exactly"))
    .with_parameter(bool_param("whole_word", "Only match whole words"))
    .with_parameter(bool_param("fixed_string", "Treat the pattern as a literal"))
    .with_parameter(int_param(
        "max_matches_per_file",
        "Cap on matches reported per file",
        MAX_MATCHES_PER_FILE.min,
        MAX_MATCHES_PER_FILE.max,
    ))
    .with_parameter(int_param(
        "max_total_matches",
        "Cap on matches reported overall",
        MAX_TOTAL_MATCHES.min,
        MAX_TOTAL_MATCHES.max,
    ))
    .with_parameter(
        ToolParameter::new("output_mode", "Shape of the result", false)
            .with_allowed_values(GrepOutputMode::ALL.iter().map(|m| m.as_str())),
    )
    .with_parameter(int_param(
        "context_lines",
        "Lines of context on both sides of a match",
        CONTEXT_LINES.min,
        CONTEXT_LINES.max,
    ))
    .with_parameter(int_param(
        "lines_before",
        "Lines of context before a match",
        LINES_BEFORE_AFTER.min,
        LINES_BEFORE_AFTER.max,
    ))
    .with_parameter(int_param(
        "lines_after",
        "Lines of context after a match",
        LINES_BEFORE_AFTER.min,
        LINES_BEFORE_AFTER.max,
    ))
    .with_parameter(bool_param("highlight", "Mark the matched text in each line"))
    .with_parameter(bool_param("exhaustive", "Scan every file instead of a ranked subset"))
    .with_parameter(ToolParameter::new(
        "source",
        "Source identifier or subtree name (defaults to the first configured source)",
        false,
    ))
}

/// Build upstream options from the call, clamping every numeric cap.
pub fn options_from_call(call: &ToolCall) -> Result<GrepOptions, ToolError> {
    let pattern = call.require_string("pattern").map_err(ToolError::invalid_argument)?;
    let mut options = GrepOptions::new(pattern)?;

    if let Some(path) = call.get_string("path") {
        options = options.with_path(path);
    }
    options.case_sensitive = call.get_bool("case_sensitive");
    options.whole_word = call.get_bool("whole_word");
    options.fixed_string = call.get_bool("fixed_string");
    options.highlight = call.get_bool("highlight");
    options.exhaustive = call.get_bool("exhaustive");

    if let Some(v) = call.get_i64("max_matches_per_file") {
        options = options.with_max_matches_per_file(v);
    }
    if let Some(v) = call.get_i64("max_total_matches") {
        options = options.with_max_total_matches(v);
    }
    if let Some(v) = call.get_i64("context_lines") {
        options = options.with_context_lines(v);
    }
    if let Some(v) = call.get_i64("lines_before") {
        options = options.with_lines_before(v);
    }
    if let Some(v) = call.get_i64("lines_after") {
        options = options.with_lines_after(v);
    }
    if let Some(mode) = call.get_string("output_mode") {
        options = options.with_output_mode(mode.parse::<GrepOutputMode>()?);
    }
    Ok(options)
}

#[derive(Debug, Serialize)]
struct GrepOutput {
    source: String,
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_filter: Option<String>,
    output_mode: GrepOutputMode,
    /// Matches under the prefix, in upstream order
    matches: Vec<GrepMatch>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    by_file: BTreeMap<String, Vec<GrepMatch>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    counts: BTreeMap<String, u64>,
    total_matches: u64,
    files_searched: u64,
    files_with_matches: u64,
    truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Value>,
}

pub async fn execute(ctx: &ToolContext<'_>, call: &ToolCall) -> Result<ToolOutput, ToolError> {
    let options = options_from_call(call)?;
    let target = ctx.sources.resolve_source(call.get_string("source"))?;

    let response = ctx.api.grep(&target, &options).await?;

    let matches: Vec<GrepMatch> = response
        .matches
        .into_iter()
        .filter(|m| options.matches_path(&m.path))
        .collect();
    let mut by_file: BTreeMap<String, Vec<GrepMatch>> = BTreeMap::new();
    for m in &matches {
        by_file.entry(m.path.clone()).or_default().push(m.clone());
    }
    let files: Vec<String> = response
        .files
        .into_iter()
        .filter(|f| options.matches_path(f))
        .collect();
    let counts: BTreeMap<String, u64> = response
        .counts
        .into_iter()
        .filter(|(f, _)| options.matches_path(f))
        .collect();

    let listed_files = by_file.len().max(files.len()).max(counts.len()) as u64;

    // Upstream totals can include files outside the prefix, so they only
    // stand when no prefix is set.
    let (total_matches, files_with_matches) = if options.path.is_some() {
        let listed: u64 = matches.len() as u64;
        (listed.max(counts.values().sum()), listed_files)
    } else {
        (
            response.total_matches,
            response.files_with_matches.unwrap_or(listed_files),
        )
    };

    let payload = to_payload(&GrepOutput {
        source: target.id.clone(),
        pattern: response.pattern,
        path_filter: options.path.clone(),
        output_mode: options.output_mode.unwrap_or_default(),
        matches,
        by_file,
        files,
        counts,
        total_matches,
        files_searched: response.files_searched,
        files_with_matches,
        truncated: response.truncated,
        options: response.options,
    })?;
    Ok(ToolOutput::new(payload)
        .with_source(target.id)
        .with_match_count(total_matches as usize))
}
