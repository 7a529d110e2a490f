//! Tool domain module
//!
//! This module defines the core abstractions for the **Tool System**: the
//! closed catalogue of remote operations the orchestration runtime may
//! invoke mid-conversation, each backed by exactly one call to the search
//! API.
//!
//! # Overview
//!
//! Every tool is defined by a [`ToolDefinition`] (name, typed parameters),
//! invoked via a [`ToolCall`], and returns a [`ToolResult`] carrying either
//! a JSON payload or a [`ToolError`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalogue)  │    │ (invocation) │    │ (payload or  │
//! └──────┬───────┘    └──────────────┘    │  ToolError)  │
//!        │                                └──────────────┘
//!        ├─ aliases: "ls" → "list_directory"
//!        └─ tools:   "grep" → ToolDefinition
//! ```
//!
//! # Tool Name Alias System
//!
//! Models frequently guess tool names (`read` instead of `read_document`,
//! `tree` instead of `browse`). [`ToolSpec`] resolves aliases to canonical
//! names without an extra model round-trip:
//!
//! - [`ToolSpec::resolve_alias`]: resolves alias → canonical name (aliases only)
//! - [`ToolSpec::resolve`]: resolves any name (canonical or alias)
//! - [`ToolSpec::get_resolved`]: looks up a [`ToolDefinition`] by canonical or alias name
//!
//! # Validation
//!
//! [`ToolValidator`] checks a call against its definition (required and
//! unknown parameters, JSON types, enumerations) before any request is
//! built. Range limits are not validation failures: they are clamped by the
//! option types in [`crate::search`].
//!
//! # Error Codes
//!
//! | Code | Raised when |
//! |------|-------------|
//! | `INVALID_ARGUMENT` | Argument missing, mistyped or outside its domain |
//! | `NOT_FOUND` | Unknown tool name |
//! | `CONFIG_ERROR` | Credential or sources missing for the call |
//! | `UPSTREAM_ERROR` | Search API failed, or answered with an unexpected shape |

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
