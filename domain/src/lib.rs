//! Domain layer for niagate
//!
//! This crate contains the core rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Rate limiting
//!
//! Fixed-window admission per client key: a [`RateLimitTable`] hands out
//! [`RateLimitDecision`]s, and sweeps expired windows on its own schedule.
//!
//! ## Sources
//!
//! A [`SourceCatalog`] describes which indexed corpora a deployment
//! searches and resolves scopes and source identifiers to upstream targets.
//!
//! ## Tools
//!
//! The catalogue of remote operations ([`ToolSpec`], [`ToolDefinition`]),
//! their invocations ([`ToolCall`]) and outcomes ([`ToolResult`]).

pub mod core;
pub mod rate_limit;
pub mod search;
pub mod source;
pub mod tool;

// Re-export commonly used types
pub use core::{error::DomainError, string::truncate};
pub use rate_limit::{
    ClientKey, RateLimitDecision, RateLimitEntry, RateLimitPolicy, RateLimitTable,
};
pub use search::{GrepOptions, GrepOutputMode, WebCategory, WebSearchOptions};
pub use source::{SearchTargets, SourceCatalog, SourceCategory, SourceKind, SourceTarget, Subtree};
pub use tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
