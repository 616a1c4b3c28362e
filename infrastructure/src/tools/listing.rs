//! Bounded directory lister: ListFiles

use super::io_tool_error;
use crate::workspace::{ConfinementError, confine, resolve_confined};
use async_trait::async_trait;
use codelens_application::{InvocationContext, ports::tool::Tool};
use codelens_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use codelens_domain::workspace::{
    DEFAULT_LIST_DEPTH, EmptyPath, ResolvedPath, WorkspaceRoot, effective_depth,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Tool name constant
pub const LIST_FILES: &str = "ListFiles";

/// Get the tool definition for ListFiles
pub fn list_files_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_FILES,
        "List files and directories under a workspace directory, recursing up to the given \
         depth. Paths are workspace-relative and can be passed straight to ReadFile.",
    )
    .with_parameter(
        ToolParameter::new(
            "directory",
            "Workspace-relative directory to list (default: workspace root)",
            false,
        )
        .with_type(ParamType::Path)
        .with_default("."),
    )
    .with_parameter(
        ToolParameter::new(
            "depth",
            "How many levels to descend; 1 lists direct children only",
            false,
        )
        .with_type(ParamType::Integer)
        .with_default(DEFAULT_LIST_DEPTH),
    )
}

#[derive(Debug, Deserialize)]
struct ListFilesArgs {
    #[serde(default)]
    directory: String,
    #[serde(default)]
    depth: i64,
}

/// Success payload of ListFiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesOutput {
    /// Workspace-relative paths in pre-order, children sorted by name
    pub files: Vec<String>,
}

#[derive(Error, Debug)]
enum WalkError {
    #[error("listing cancelled")]
    Cancelled,

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl From<WalkError> for ToolError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::Cancelled => ToolError::cancelled(),
            WalkError::Io { path, source } => io_tool_error(&path, &source),
        }
    }
}

pub struct ListFilesTool {
    root: Arc<WorkspaceRoot>,
    definition: ToolDefinition,
}

impl ListFilesTool {
    pub fn new(root: Arc<WorkspaceRoot>) -> Self {
        Self {
            root,
            definition: list_files_definition(),
        }
    }

    async fn list(&self, call: &ToolCall, ctx: &InvocationContext) -> Result<ToolResult, ToolError> {
        let args: ListFilesArgs = call.parse_args().map_err(ToolError::invalid_argument)?;
        let max_depth = effective_depth(args.depth);

        // The target directory becomes the sub-root of the walk
        let confined = resolve_confined(&self.root, &args.directory, EmptyPath::Root)?;
        ctx.check_cancelled()?;

        let shown = confined.resolved.to_string();
        let token = ctx.cancellation_token().clone();
        let root = Arc::clone(&self.root);
        let files = tokio::task::spawn_blocking(move || {
            let metadata = std::fs::metadata(&confined.host).map_err(|source| WalkError::Io {
                path: confined.resolved.to_string(),
                source,
            })?;
            if !metadata.is_dir() {
                return Ok(None);
            }
            let mut files = Vec::new();
            let walker = Walker {
                root: &root,
                max_depth,
                token: &token,
            };
            walker.walk(&confined.host, &confined.resolved, 1, &mut files)?;
            Ok::<_, WalkError>(Some(files))
        })
        .await
        .map_err(|e| ToolError::execution_failed(format!("Listing task failed: {}", e)))??;

        let Some(files) = files else {
            return Err(ToolError::invalid_argument(format!(
                "{} is not a directory",
                shown
            )));
        };

        debug!(directory = %shown, depth = max_depth, entries = files.len(), "Listed directory");

        let entries = files.len();
        Ok(
            ToolResult::from_payload(LIST_FILES, &ListFilesOutput { files }).with_metadata(
                ToolResultMetadata {
                    path: Some(shown),
                    entries: Some(entries),
                    ..Default::default()
                },
            ),
        )
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, call: &ToolCall, ctx: &InvocationContext) -> ToolResult {
        self.list(call, ctx)
            .await
            .unwrap_or_else(|e| ToolResult::failure(LIST_FILES, e))
    }
}

struct Walker<'a> {
    root: &'a WorkspaceRoot,
    max_depth: usize,
    token: &'a CancellationToken,
}

impl Walker<'_> {
    /// Pre-order walk of `dir`, whose children sit at `level`.
    ///
    /// Symlinks are reported but never followed, so the walk cannot leave the
    /// confined sub-root. A symlink whose target lies outside the workspace is
    /// omitted. Directories deeper than `max_depth` are not entered.
    fn walk(
        &self,
        dir: &Path,
        relative: &ResolvedPath,
        level: usize,
        out: &mut Vec<String>,
    ) -> Result<(), WalkError> {
        if self.token.is_cancelled() {
            return Err(WalkError::Cancelled);
        }

        let io_err = |source: io::Error| WalkError::Io {
            path: relative.to_string(),
            source,
        };

        let mut children: Vec<(std::ffi::OsString, std::fs::FileType)> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            // DirEntry::file_type does not traverse symlinks
            children.push((entry.file_name(), entry.file_type().map_err(io_err)?));
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, file_type) in children {
            let Some(child) = relative.child(&name) else {
                continue;
            };
            if file_type.is_symlink() && self.escapes(&child) {
                debug!(path = %child, "Skipping symlink that leaves the workspace");
                continue;
            }
            out.push(child.to_slash_string());
            if file_type.is_dir() && level < self.max_depth {
                let host: PathBuf = dir.join(&name);
                self.walk(&host, &child, level + 1, out)?;
            }
        }
        Ok(())
    }

    /// Dangling links stay listed; reading them reports not found.
    fn escapes(&self, link: &ResolvedPath) -> bool {
        matches!(
            confine(self.root, link),
            Err(ConfinementError::Escapes(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::file::ReadFileTool;
    use crate::workspace::open_root;
    use std::fs;

    fn setup() -> (tempfile::TempDir, Arc<WorkspaceRoot>) {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        fs::create_dir_all(p.join("src/tools/git")).unwrap();
        fs::create_dir_all(p.join("docs")).unwrap();
        fs::write(p.join("Cargo.toml"), "[package]\n").unwrap();
        fs::write(p.join("src/lib.rs"), "mod tools;\n").unwrap();
        fs::write(p.join("src/tools/mod.rs"), "mod git;\n").unwrap();
        fs::write(p.join("src/tools/git/mod.rs"), "\n").unwrap();
        fs::write(p.join("docs/guide.md"), "# Guide\n").unwrap();
        let root = Arc::new(open_root(p).unwrap());
        (dir, root)
    }

    async fn list(root: &Arc<WorkspaceRoot>, call: ToolCall) -> ToolResult {
        ListFilesTool::new(root.clone())
            .invoke(&call, &InvocationContext::new())
            .await
    }

    fn files(result: &ToolResult) -> Vec<String> {
        let out: ListFilesOutput = serde_json::from_value(result.output().unwrap().clone()).unwrap();
        out.files
    }

    #[tokio::test]
    async fn test_default_depth_lists_direct_children() {
        let (_dir, root) = setup();
        let result = list(&root, ToolCall::new(LIST_FILES)).await;
        assert_eq!(files(&result), vec!["Cargo.toml", "docs", "src"]);
        assert_eq!(result.metadata.entries, Some(3));
    }

    #[tokio::test]
    async fn test_depth_two_adds_one_level() {
        let (_dir, root) = setup();
        let result = list(&root, ToolCall::new(LIST_FILES).with_arg("depth", 2)).await;
        assert_eq!(
            files(&result),
            vec!["Cargo.toml", "docs", "docs/guide.md", "src", "src/lib.rs", "src/tools"]
        );
    }

    #[tokio::test]
    async fn test_non_positive_depth_means_one() {
        let (_dir, root) = setup();
        let zero = list(&root, ToolCall::new(LIST_FILES).with_arg("depth", 0)).await;
        let negative = list(&root, ToolCall::new(LIST_FILES).with_arg("depth", -4)).await;
        assert_eq!(files(&zero), files(&negative));
        assert!(files(&zero).iter().all(|f| !f.contains('/')));
    }

    #[tokio::test]
    async fn test_subdirectory_is_workspace_relative() {
        let (_dir, root) = setup();
        let call = ToolCall::new(LIST_FILES)
            .with_arg("directory", "src")
            .with_arg("depth", 1);
        assert_eq!(files(&list(&root, call).await), vec!["src/lib.rs", "src/tools"]);

        let deep = ToolCall::new(LIST_FILES)
            .with_arg("directory", "src/tools")
            .with_arg("depth", 5);
        assert_eq!(
            files(&list(&root, deep).await),
            vec!["src/tools/git", "src/tools/git/mod.rs", "src/tools/mod.rs"]
        );
    }

    #[tokio::test]
    async fn test_escape_and_errors() {
        let (_dir, root) = setup();
        let escape = list(&root, ToolCall::new(LIST_FILES).with_arg("directory", "..")).await;
        assert_eq!(escape.error().unwrap().code, "ACCESS_DENIED");

        let missing = list(&root, ToolCall::new(LIST_FILES).with_arg("directory", "nope")).await;
        assert_eq!(missing.error().unwrap().code, "NOT_FOUND");

        let file = list(&root, ToolCall::new(LIST_FILES).with_arg("directory", "Cargo.toml")).await;
        assert_eq!(file.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_are_listed_not_followed() {
        let (dir, root) = setup();
        std::os::unix::fs::symlink(dir.path().join("docs"), dir.path().join("link")).unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("away")).unwrap();

        let result = list(&root, ToolCall::new(LIST_FILES).with_arg("depth", 3)).await;
        let listed = files(&result);
        assert!(listed.contains(&"link".to_string()));
        assert!(!listed.contains(&"link/guide.md".to_string()));
        assert!(!listed.iter().any(|f| f.starts_with("away") || f.contains("secret")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_escaping_file_symlink_is_omitted() {
        let (dir, root) = setup();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), dir.path().join("link.txt"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("Cargo.toml"), dir.path().join("inside.toml"))
            .unwrap();

        let listed = files(&list(&root, ToolCall::new(LIST_FILES).with_arg("depth", 3)).await);
        assert!(!listed.contains(&"link.txt".to_string()));
        assert!(listed.contains(&"inside.toml".to_string()));

        let reader = ReadFileTool::new(root.clone());
        for path in listed {
            let result = reader
                .invoke(
                    &ToolCall::new("ReadFile").with_arg("path", path.as_str()),
                    &InvocationContext::new(),
                )
                .await;
            if let Some(err) = result.error() {
                assert_ne!(err.code, "ACCESS_DENIED", "{}: {}", path, err);
            }
        }
    }

    #[tokio::test]
    async fn test_every_listed_file_is_readable() {
        let (_dir, root) = setup();
        let listed = files(&list(&root, ToolCall::new(LIST_FILES).with_arg("depth", 10)).await);
        let reader = ReadFileTool::new(root.clone());

        for path in listed {
            let result = reader
                .invoke(
                    &ToolCall::new("ReadFile").with_arg("path", path.as_str()),
                    &InvocationContext::new(),
                )
                .await;
            if let Some(err) = result.error() {
                // Directories are rejected as arguments, never as escapes
                assert_eq!(err.code, "INVALID_ARGUMENT", "{}: {}", path, err);
            }
        }
    }
}
