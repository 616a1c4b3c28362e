//! Application layer for codelens
//!
//! This crate contains the tool ports, the per-invocation context and the
//! invocation use case. It depends only on the domain layer.

pub mod context;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use context::InvocationContext;
pub use ports::{
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
    tool::Tool,
    tool_executor::{RegistryError, ToolExecutorPort},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::invoke_tool::InvokeToolUseCase;
