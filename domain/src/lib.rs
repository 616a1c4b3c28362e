//! Domain layer for codelens
//!
//! This crate contains the pure types and logic of the sandboxed workspace
//! access layer. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! Named, schema-described read-only operations (`ListFiles`, `ReadFile`,
//! `GitStatus`, `GitLog`, `GitDiff`) invoked by an external agent.
//!
//! ## Workspace
//!
//! A fixed root directory. Agent-supplied paths are resolved against it and
//! refused when they escape.
//!
//! ## Version control
//!
//! Status, log and diff results and the parsers that build them.

pub mod config;
pub mod tool;
pub mod util;
pub mod vcs;
pub mod workspace;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolOutcome, ToolResult, ToolResultMetadata},
};
pub use vcs::{CommitSummary, DiffReport, LogReport, StatusReport};
pub use workspace::{EmptyPath, PathDenied, ReadRequest, ResolvedPath, WorkspaceRoot};
