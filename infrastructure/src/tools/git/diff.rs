//! GitDiff: unified diff of the working tree

use super::{GitError, GitRunner, GitSettings, command_label};
use async_trait::async_trait;
use codelens_application::{InvocationContext, ports::tool::Tool};
use codelens_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use codelens_domain::util::lossy_text_capped;
use codelens_domain::vcs::DiffReport;
use codelens_domain::workspace::{EmptyPath, ResolvedPath, WorkspaceRoot};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Tool name constant
pub const GIT_DIFF: &str = "GitDiff";

/// Get the tool definition for GitDiff
pub fn git_diff_definition() -> ToolDefinition {
    ToolDefinition::new(
        GIT_DIFF,
        "Show a unified diff of the working tree. Without a commit, compares against the \
         index; with one, compares against that revision. Optionally restricted to one path.",
    )
    .with_parameter(
        ToolParameter::new("commit", "Revision to compare the working tree against", false)
            .with_type(ParamType::String),
    )
    .with_parameter(
        ToolParameter::new("path", "Workspace-relative path to restrict the diff to", false)
            .with_type(ParamType::Path),
    )
}

#[derive(Debug, Deserialize)]
struct GitDiffArgs {
    #[serde(default)]
    commit: Option<String>,
    #[serde(default)]
    path: Option<String>,
}

pub struct GitDiffTool {
    root: Arc<WorkspaceRoot>,
    runner: GitRunner,
    definition: ToolDefinition,
}

impl GitDiffTool {
    pub fn new(root: Arc<WorkspaceRoot>, settings: GitSettings) -> Self {
        Self {
            runner: GitRunner::new(&root, settings),
            root,
            definition: git_diff_definition(),
        }
    }

    async fn diff(
        &self,
        commit: Option<&str>,
        path: Option<&ResolvedPath>,
        ctx: &InvocationContext,
    ) -> Result<DiffReport, GitError> {
        let args = diff_args(commit, path);
        let limit = self.runner.settings().max_diff_bytes;
        let output = self.runner.run(&args, Some(limit), ctx).await?;

        if !output.status.success() && !output.truncated {
            return Err(GitError::CommandFailed {
                command: command_label(&args),
                code: output.status.code(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        let (result, cut) = lossy_text_capped(&output.stdout, limit);
        let truncated = output.truncated || cut;
        if truncated {
            debug!(limit, "Diff output truncated");
        }
        Ok(DiffReport { result, truncated })
    }
}

/// Caller values go after `--end-of-options` and `--`; pathspec magic is off.
/// The pathspec always names something under the workspace, and `--relative`
/// prints paths relative to it.
fn diff_args(commit: Option<&str>, path: Option<&ResolvedPath>) -> Vec<String> {
    let mut args: Vec<String> = [
        "--literal-pathspecs",
        "diff",
        "--no-color",
        "--no-ext-diff",
        "--no-textconv",
        "--relative",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if let Some(commit) = commit {
        args.push("--end-of-options".to_string());
        args.push(commit.to_string());
    }
    args.push("--".to_string());
    match path.filter(|p| !p.is_root()) {
        Some(path) => args.push(path.to_slash_string()),
        None => args.push(".".to_string()),
    }
    args
}

#[async_trait]
impl Tool for GitDiffTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, call: &ToolCall, ctx: &InvocationContext) -> ToolResult {
        let args: GitDiffArgs = match call.parse_args() {
            Ok(args) => args,
            Err(e) => return ToolResult::failure(GIT_DIFF, ToolError::invalid_argument(e)),
        };
        let commit = args.commit.as_deref().filter(|c| !c.is_empty());

        // Lexical check only: a deleted file has no host path to canonicalize,
        // and git itself refuses pathspecs outside the repository
        let path = match args.path.as_deref() {
            Some(raw) if !raw.is_empty() => match self.root.resolve(raw, EmptyPath::Root) {
                Ok(path) => Some(path),
                Err(e) => {
                    return ToolResult::failure(GIT_DIFF, ToolError::access_denied(e.to_string()));
                }
            },
            _ => None,
        };

        match self.diff(commit, path.as_ref(), ctx).await {
            Ok(report) => {
                let metadata = ToolResultMetadata {
                    bytes: Some(report.result.len()),
                    path: path.map(|p| p.to_string()),
                    truncated: Some(report.truncated),
                    ..Default::default()
                };
                ToolResult::from_payload(GIT_DIFF, &report).with_metadata(metadata)
            }
            Err(e) => ToolResult::failure(GIT_DIFF, e.into()),
        }
    }
}
