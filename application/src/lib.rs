//! Application layer for niagate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ProxyConfig;
pub use ports::{
    clock::Clock,
    search_api::{SearchApiError, SearchApiPort},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::check_rate_limit::RateLimiter;
pub use use_cases::run_tool::{ToolProxy, default_tool_spec};
