//! GitStatus: modified and untracked paths

use super::{GitError, GitRunner, GitSettings};
use async_trait::async_trait;
use codelens_application::{InvocationContext, ports::tool::Tool};
use codelens_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    value_objects::{ToolResult, ToolResultMetadata},
};
use codelens_domain::vcs::{StatusReport, parse_porcelain_status};
use codelens_domain::workspace::WorkspaceRoot;
use std::sync::Arc;

/// Tool name constant
pub const GIT_STATUS: &str = "GitStatus";

/// Get the tool definition for GitStatus
pub fn git_status_definition() -> ToolDefinition {
    ToolDefinition::new(
        GIT_STATUS,
        "Show the working tree status: paths with staged or unstaged changes under \
         'modified', paths not tracked by git under 'untracked'.",
    )
}

pub struct GitStatusTool {
    runner: GitRunner,
    definition: ToolDefinition,
}

impl GitStatusTool {
    pub fn new(root: Arc<WorkspaceRoot>, settings: GitSettings) -> Self {
        Self {
            runner: GitRunner::new(&root, settings),
            definition: git_status_definition(),
        }
    }

    /// Workspace location inside the repository, `""` at the top level
    async fn prefix(&self, ctx: &InvocationContext) -> Result<String, GitError> {
        let args = ["rev-parse", "--show-prefix"].map(String::from);
        let output = self.runner.run_checked(&args, ctx).await?;
        let prefix = String::from_utf8_lossy(&output.stdout);
        Ok(prefix.trim_end_matches('\n').to_string())
    }

    async fn status(&self, ctx: &InvocationContext) -> Result<StatusReport, GitError> {
        let prefix = self.prefix(ctx).await?;
        let args = [
            "--literal-pathspecs",
            "status",
            "--porcelain=v1",
            "-z",
            "--untracked-files=all",
            "--ignore-submodules=none",
            "--",
            ".",
        ]
        .map(String::from);
        let output = self.runner.run_checked(&args, ctx).await?;
        // Porcelain paths are relative to the repository top, not the cwd
        Ok(parse_porcelain_status(&output.stdout)?.scoped_to(&prefix))
    }
}

#[async_trait]
impl Tool for GitStatusTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, _call: &ToolCall, ctx: &InvocationContext) -> ToolResult {
        match self.status(ctx).await {
            Ok(report) => {
                let entries = report.len();
                ToolResult::from_payload(GIT_STATUS, &report).with_metadata(ToolResultMetadata {
                    entries: Some(entries),
                    ..Default::default()
                })
            }
            Err(e) => ToolResult::failure(GIT_STATUS, e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use std::fs;

    async fn status(root: Arc<WorkspaceRoot>) -> ToolResult {
        GitStatusTool::new(root, GitSettings::default())
            .invoke(&ToolCall::new(GIT_STATUS), &InvocationContext::new())
            .await
    }

    #[tokio::test]
    async fn test_modified_and_untracked_are_disjoint() {
        if !git_available() {
            return;
        }
        let (dir, root) = repo_with_commit();
        fs::write(dir.path().join("tracked.txt"), "two\n").unwrap();
        fs::write(dir.path().join("new.txt"), "new\n").unwrap();

        let result = status(root).await;
        let report: StatusReport =
            serde_json::from_value(result.output().unwrap().clone()).unwrap();
        assert_eq!(report.modified, vec!["tracked.txt"]);
        assert_eq!(report.untracked, vec!["new.txt"]);
        assert_eq!(result.metadata.entries, Some(2));
    }

    #[tokio::test]
    async fn test_staged_change_counts_as_modified() {
        if !git_available() {
            return;
        }
        let (dir, root) = repo_with_commit();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/added.rs"), "fn main() {}\n").unwrap();
        git(dir.path(), &["add", "src/added.rs"]);

        let result = status(root).await;
        let report: StatusReport =
            serde_json::from_value(result.output().unwrap().clone()).unwrap();
        assert_eq!(report.modified, vec!["src/added.rs"]);
        assert!(report.untracked.is_empty());
    }

    #[tokio::test]
    async fn test_clean_repository() {
        if !git_available() {
            return;
        }
        let (_dir, root) = repo_with_commit();
        let result = status(root).await;
        let report: StatusReport =
            serde_json::from_value(result.output().unwrap().clone()).unwrap();
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_nested_workspace_reports_only_its_own_paths() {
        if !git_available() {
            return;
        }
        let (dir, _) = repo_with_commit();
        fs::create_dir_all(dir.path().join("ws/src")).unwrap();
        fs::write(dir.path().join("ws/inner.txt"), "inner\n").unwrap();
        git(dir.path(), &["add", "ws/inner.txt"]);
        git(dir.path(), &["commit", "-q", "-m", "Add workspace"]);
        fs::write(dir.path().join("tracked.txt"), "two\n").unwrap();
        fs::write(dir.path().join("outside_untracked.txt"), "x\n").unwrap();
        fs::write(dir.path().join("ws/inner.txt"), "edited\n").unwrap();
        fs::write(dir.path().join("ws/src/new.rs"), "\n").unwrap();

        let root = Arc::new(crate::workspace::open_root(&dir.path().join("ws")).unwrap());
        let result = status(root.clone()).await;
        let report: StatusReport =
            serde_json::from_value(result.output().unwrap().clone()).unwrap();
        assert_eq!(report.modified, vec!["inner.txt"]);
        assert_eq!(report.untracked, vec!["src/new.rs"]);

        // Reported paths are workspace-relative, so they read back directly
        let reader = crate::tools::file::ReadFileTool::new(root);
        let read = reader
            .invoke(
                &ToolCall::new("ReadFile").with_arg("path", "inner.txt"),
                &InvocationContext::new(),
            )
            .await;
        assert!(read.is_success(), "{:?}", read.error());
    }

    #[tokio::test]
    async fn test_not_a_repository_is_tool_error() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let root = Arc::new(crate::workspace::open_root(dir.path()).unwrap());
        let result = status(root).await;
        // Error result, not a panic or registry failure
        assert_eq!(result.error().unwrap().code, "EXECUTION_FAILED");
    }
}
