//! Tool Registry
//!
//! The [`ToolRegistry`] holds every registered [`Tool`] by name and
//! implements [`ToolExecutorPort`]. Calls are validated against the tool's
//! definition before they reach the tool.
//!
//! # Usage
//!
//! ```ignore
//! use codelens_infrastructure::tools::{GitSettings, ToolRegistry};
//!
//! let root = Arc::new(open_current_dir()?);
//! let registry = ToolRegistry::with_builtins(root, GitSettings::default());
//!
//! assert!(registry.has_tool("ReadFile"));
//!
//! let call = ToolCall::new("ReadFile").with_arg("path", "README.md");
//! let result = registry.invoke(&call, &InvocationContext::new()).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use codelens_application::{
    InvocationContext,
    ports::{
        tool::Tool,
        tool_executor::{RegistryError, ToolExecutorPort},
    },
};
use codelens_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use codelens_domain::workspace::WorkspaceRoot;
use tracing::{debug, warn};

use super::file::ReadFileTool;
use super::git::{GitDiffTool, GitLogTool, GitSettings, GitStatusTool};
use super::listing::ListFilesTool;

/// Name-keyed collection of tools
///
/// Populated once at startup and read-only afterwards, so it can be shared
/// behind an `Arc` by concurrent invocations.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Merged tool specification
    tool_spec: ToolSpec,
    validator: DefaultToolValidator,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            tool_spec: ToolSpec::new(),
            validator: DefaultToolValidator,
        }
    }

    /// Registry with the five built-in workspace tools
    pub fn with_builtins(root: Arc<WorkspaceRoot>, git: GitSettings) -> Self {
        Self::new()
            .register(ListFilesTool::new(root.clone()))
            .register(ReadFileTool::new(root.clone()))
            .register(GitStatusTool::new(root.clone(), git.clone()))
            .register(GitLogTool::new(root.clone(), git.clone()))
            .register(GitDiffTool::new(root, git))
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(self, tool: T) -> Self {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool (Arc version). A later registration under the same
    /// name replaces the earlier one.
    pub fn register_arc(mut self, tool: Arc<dyn Tool>) -> Self {
        let definition = tool.definition().clone();
        if self.tools.contains_key(&definition.name) {
            warn!(tool = %definition.name, "Replacing previously registered tool");
        } else {
            debug!(tool = %definition.name, "Registered tool");
        }
        self.tools.insert(definition.name.clone(), tool);
        self.tool_spec = self.tool_spec.register(definition);
        self
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn invoke(
        &self,
        call: &ToolCall,
        ctx: &InvocationContext,
    ) -> Result<ToolResult, RegistryError> {
        let tool = self
            .tools
            .get(&call.tool_name)
            .ok_or_else(|| RegistryError::UnknownTool(call.tool_name.clone()))?;

        if let Err(message) = self.validator.validate(call, tool.definition()) {
            debug!(tool = %call.tool_name, error = %message, "Rejected tool arguments");
            return Ok(ToolResult::failure(
                &call.tool_name,
                ToolError::invalid_argument(message),
            ));
        }

        Ok(tool.invoke(call, ctx).await)
    }
}
