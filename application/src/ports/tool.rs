//! Tool port
//!
//! The contract every registrable tool implements. The registry depends
//! only on this trait.

use crate::context::InvocationContext;
use async_trait::async_trait;
use codelens_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    value_objects::ToolResult,
};

/// A named, schema-described read-only operation.
///
/// Operational failures (bad paths, missing files, VCS errors) are returned
/// inside the [`ToolResult`], never as panics or hard errors.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name, description and parameter schema
    fn definition(&self) -> &ToolDefinition;

    fn name(&self) -> &str {
        &self.definition().name
    }

    /// Run the tool. Arguments have already been validated against
    /// [`definition`](Self::definition).
    async fn invoke(&self, call: &ToolCall, ctx: &InvocationContext) -> ToolResult;
}
