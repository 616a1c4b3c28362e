//! Invoke Tool use case.
//!
//! Runs a single tool call through a [`ToolExecutorPort`], wrapping it with
//! the before/after hooks every invocation gets:
//!
//! 1. `tracing` event and `tool_call` log record before dispatch
//! 2. deadline from [`InvocationContext::timeout`], racing cancellation
//! 3. `tracing` event and `tool_result` log record after completion

use crate::context::InvocationContext;
use crate::ports::invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger};
use crate::ports::tool_executor::{RegistryError, ToolExecutorPort};
use crate::use_cases::tool_helpers::tool_args_preview;
use codelens_domain::tool::{
    entities::ToolCall,
    value_objects::{ToolError, ToolResult},
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Use case for invoking one tool.
pub struct InvokeToolUseCase {
    executor: Arc<dyn ToolExecutorPort>,
    invocation_logger: Arc<dyn InvocationLogger>,
}

impl Clone for InvokeToolUseCase {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            invocation_logger: self.invocation_logger.clone(),
        }
    }
}

impl InvokeToolUseCase {
    pub fn new(executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            executor,
            invocation_logger: Arc::new(NoInvocationLogger),
        }
    }

    /// Set the invocation logger for structured JSONL logging.
    pub fn with_invocation_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.invocation_logger = logger;
        self
    }

    pub fn executor(&self) -> &Arc<dyn ToolExecutorPort> {
        &self.executor
    }

    /// Invoke a tool.
    ///
    /// `Err` is returned only for an unknown tool name. Cancellation and
    /// timeouts produce `CANCELLED` / `TIMEOUT` tool results.
    pub async fn execute(
        &self,
        call: &ToolCall,
        ctx: &InvocationContext,
    ) -> Result<ToolResult, RegistryError> {
        let tool_name = call.tool_name.as_str();
        if !self.executor.has_tool(tool_name) {
            warn!(tool = tool_name, "Rejected call to unknown tool");
            return Err(RegistryError::UnknownTool(tool_name.to_string()));
        }

        info!(
            tool = tool_name,
            args = %tool_args_preview(call),
            "Tool call started"
        );
        self.invocation_logger.log(InvocationEvent::new(
            "tool_call",
            json!({
                "tool": tool_name,
                "arguments": call.arguments,
            }),
        ));

        let started = Instant::now();
        let result = self.run(call, ctx).await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        let result = if result.metadata.duration_ms.is_none() {
            result.with_duration(duration_ms)
        } else {
            result
        };

        match result.error() {
            None => info!(
                tool = tool_name,
                duration_ms,
                success = true,
                "Tool call finished"
            ),
            Some(err) => info!(
                tool = tool_name,
                duration_ms,
                success = false,
                code = %err.code,
                "Tool call finished: {}",
                err.message
            ),
        }

        let mut payload = json!({
            "tool": tool_name,
            "success": result.is_success(),
            "duration_ms": duration_ms,
        });
        if let Some(err) = result.error() {
            payload["error_code"] = json!(err.code);
            payload["error"] = json!(err.message);
        }
        if let Some(bytes) = result.metadata.bytes {
            payload["bytes"] = json!(bytes);
        }
        if let Some(entries) = result.metadata.entries {
            payload["entries"] = json!(entries);
        }
        self.invocation_logger
            .log(InvocationEvent::new("tool_result", payload));

        Ok(result)
    }

    async fn run(
        &self,
        call: &ToolCall,
        ctx: &InvocationContext,
    ) -> Result<ToolResult, RegistryError> {
        if ctx.is_cancelled() {
            return Ok(ToolResult::failure(&call.tool_name, ToolError::cancelled()));
        }

        // Own token so a timeout cancels this invocation only
        let invocation = ctx.child();

        let attempt = async {
            tokio::select! {
                biased;
                _ = invocation.cancelled() => {
                    debug!(tool = %call.tool_name, "Tool call cancelled");
                    Ok(ToolResult::failure(&call.tool_name, ToolError::cancelled()))
                }
                result = self.executor.invoke(call, &invocation) => result,
            }
        };

        match ctx.timeout() {
            Some(limit) if !limit.is_zero() => match tokio::time::timeout(limit, attempt).await {
                Ok(result) => result,
                Err(_) => {
                    invocation.cancel();
                    warn!(
                        tool = %call.tool_name,
                        timeout_secs = limit.as_secs_f64(),
                        "Tool call timed out"
                    );
                    Ok(ToolResult::failure(
                        &call.tool_name,
                        ToolError::timeout(format!(
                            "{} exceeded {:.1}s",
                            call.tool_name,
                            limit.as_secs_f64()
                        )),
                    ))
                }
            },
            _ => attempt.await,
        }
    }
}
