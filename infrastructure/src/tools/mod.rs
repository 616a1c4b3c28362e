//! Workspace tool implementations
//!
//! Concrete [`Tool`](codelens_application::ports::tool::Tool)s that give an
//! agent read-only access to the workspace:
//!
//! - `file`: ReadFile, bounded byte-range reads
//! - `listing`: ListFiles, depth-limited directory listing
//! - `git`: GitStatus, GitLog, GitDiff
//!
//! All of them confine paths to the [`WorkspaceRoot`](codelens_domain::workspace::WorkspaceRoot)
//! they were built with.

pub mod file;
pub mod git;
pub mod listing;

mod registry;
mod schema;

pub use file::{READ_FILE, ReadFileOutput, ReadFileTool};
pub use git::{GIT_DIFF, GIT_LOG, GIT_STATUS, GitSettings};
pub use listing::{LIST_FILES, ListFilesOutput, ListFilesTool};
pub use registry::ToolRegistry;
pub use schema::JsonSchemaToolConverter;

use codelens_domain::tool::entities::ToolSpec;
use codelens_domain::tool::value_objects::ToolError;
use std::io;

/// Create the tool specification of the built-in tools
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(listing::list_files_definition())
        .register(file::read_file_definition())
        .register(git::git_status_definition())
        .register(git::git_log_definition())
        .register(git::git_diff_definition())
}

/// Map a filesystem error on a workspace path to a tool error
pub(crate) fn io_tool_error(path: &str, err: &io::Error) -> ToolError {
    match err.kind() {
        io::ErrorKind::NotFound => ToolError::not_found(path),
        io::ErrorKind::PermissionDenied => {
            ToolError::access_denied(format!("Permission denied: {}", path))
        }
        io::ErrorKind::IsADirectory => {
            ToolError::invalid_argument(format!("{} is a directory", path))
        }
        io::ErrorKind::NotADirectory => {
            ToolError::invalid_argument(format!("{} is not a directory", path))
        }
        _ => ToolError::execution_failed(format!("{}: {}", path, err)),
    }
}
