//! Infrastructure layer for codelens
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the confined workspace root, the workspace tools and
//! their registry, configuration file loading and the JSONL invocation log.

pub mod config;
pub mod logging;
pub mod tools;
pub mod workspace;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGitConfig, FileInvocationConfig, FileLoggingConfig,
    FileOutputConfig,
};
pub use logging::JsonlInvocationLogger;
pub use tools::{GitSettings, JsonSchemaToolConverter, ToolRegistry, default_tool_spec};
pub use workspace::{
    ConfinementError, WorkspaceError, open_current_dir, open_root, resolve_confined,
};
