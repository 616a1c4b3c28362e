//! Tool Executor port
//!
//! Defines the interface for listing and invoking workspace tools.

use crate::context::InvocationContext;
use async_trait::async_trait;
use codelens_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};
use thiserror::Error;

/// Registry-level failures, distinct from errors reported inside a
/// [`ToolResult`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Port for tool execution
///
/// This port defines how the application layer executes tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().contains(name)
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// All tool definitions, sorted by name
    fn list(&self) -> Vec<&ToolDefinition> {
        self.tool_spec().sorted()
    }

    /// Get names of all available tools, sorted
    fn available_tools(&self) -> Vec<&str> {
        self.list().into_iter().map(|t| t.name.as_str()).collect()
    }

    /// Invoke a tool by name.
    ///
    /// Returns `Err` only for an unknown tool; everything else, including
    /// invalid arguments, is a [`ToolResult`].
    async fn invoke(
        &self,
        call: &ToolCall,
        ctx: &InvocationContext,
    ) -> Result<ToolResult, RegistryError>;
}
