//! Tool domain module
//!
//! Defines the read-only **tool system** an autonomous agent uses to inspect
//! a workspace: list files, read byte ranges, and query version control.
//!
//! # Overview
//!
//! Every tool is described by a [`ToolDefinition`] (name, description,
//! typed parameters), invoked via a [`ToolCall`], and answers with a
//! [`ToolResult`] holding either a structured payload or a [`ToolError`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalogue)  │    │ (invocation) │    │ output|error │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`] — Catalogue of definitions keyed by name
//! - [`ToolDefinition`] — Schema for a single tool
//! - [`ToolCall`] — An invocation request with arguments
//! - [`ToolResult`] — Outcome with structured [`ToolResultMetadata`]
//! - [`ToolValidator`] — Pure parameter validation against a definition
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application** (`Tool`, `ToolExecutorPort`): async invocation ports
//! - **Infrastructure** (`ToolRegistry`): the concrete tools

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolOutcome, ToolResult, ToolResultMetadata};
