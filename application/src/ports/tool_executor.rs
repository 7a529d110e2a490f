//! Tool Executor port
//!
//! Defines the interface for executing tools on behalf of the orchestration
//! runtime.

use async_trait::async_trait;
use niagate_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available (canonical name or alias)
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get_resolved(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get_resolved(name)
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names()
    }

    /// Execute a tool call. Never panics on bad input: every failure is
    /// reported through [`ToolResult::failure`].
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
