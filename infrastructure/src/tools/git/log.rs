//! GitLog: recent commits on the current branch

use super::{GitError, GitRunner, GitSettings};
use async_trait::async_trait;
use codelens_application::{InvocationContext, ports::tool::Tool};
use codelens_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use codelens_domain::vcs::{
    DEFAULT_MAX_LOG_ENTRIES, LOG_FORMAT, LogReport, effective_max_entries, parse_log,
};
use codelens_domain::workspace::WorkspaceRoot;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Tool name constant
pub const GIT_LOG: &str = "GitLog";

/// Get the tool definition for GitLog
pub fn git_log_definition() -> ToolDefinition {
    ToolDefinition::new(
        GIT_LOG,
        "Show the most recent commits on the current branch, newest first, with hash, \
         author, date and message.",
    )
    .with_parameter(
        ToolParameter::new(
            "maxEntries",
            format!(
                "Maximum number of commits to return (default {})",
                DEFAULT_MAX_LOG_ENTRIES
            ),
            false,
        )
        .with_type(ParamType::Integer)
        .with_default(DEFAULT_MAX_LOG_ENTRIES),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitLogArgs {
    #[serde(default)]
    max_entries: i64,
}

pub struct GitLogTool {
    runner: GitRunner,
    definition: ToolDefinition,
}

impl GitLogTool {
    pub fn new(root: Arc<WorkspaceRoot>, settings: GitSettings) -> Self {
        Self {
            runner: GitRunner::new(&root, settings),
            definition: git_log_definition(),
        }
    }

    /// `false` for a repository whose HEAD has no commits yet
    async fn has_commits(&self, ctx: &InvocationContext) -> Result<bool, GitError> {
        let args = ["rev-parse", "--verify", "--quiet", "HEAD"].map(String::from);
        let output = self.runner.run(&args, None, ctx).await?;
        match output.status.code() {
            Some(0) => Ok(true),
            // --verify --quiet exits 1 without output for an unborn HEAD
            Some(1) if output.stderr.trim().is_empty() => Ok(false),
            code => Err(GitError::CommandFailed {
                command: "rev-parse".to_string(),
                code,
                stderr: output.stderr.trim().to_string(),
            }),
        }
    }

    async fn log(&self, max_entries: usize, ctx: &InvocationContext) -> Result<LogReport, GitError> {
        if !self.has_commits(ctx).await? {
            debug!("HEAD has no commits, returning empty log");
            return Ok(LogReport::default());
        }

        let args = [
            "log".to_string(),
            "--no-color".to_string(),
            "--no-show-signature".to_string(),
            format!("--max-count={}", max_entries),
            format!("--format={}", LOG_FORMAT),
            "HEAD".to_string(),
            "--".to_string(),
        ];
        let output = self.runner.run_checked(&args, ctx).await?;
        let commits = parse_log(&String::from_utf8_lossy(&output.stdout))?;
        Ok(LogReport { commits })
    }
}

#[async_trait]
impl Tool for GitLogTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, call: &ToolCall, ctx: &InvocationContext) -> ToolResult {
        let args: GitLogArgs = match call.parse_args() {
            Ok(args) => args,
            Err(e) => return ToolResult::failure(GIT_LOG, ToolError::invalid_argument(e)),
        };
        let max_entries = effective_max_entries(args.max_entries);

        match self.log(max_entries, ctx).await {
            Ok(report) => {
                let entries = report.commits.len();
                ToolResult::from_payload(GIT_LOG, &report).with_metadata(ToolResultMetadata {
                    entries: Some(entries),
                    ..Default::default()
                })
            }
            Err(e) => ToolResult::failure(GIT_LOG, e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    async fn log(root: Arc<WorkspaceRoot>, call: ToolCall) -> ToolResult {
        GitLogTool::new(root, GitSettings::default())
            .invoke(&call, &InvocationContext::new())
            .await
    }

    fn report(result: &ToolResult) -> LogReport {
        serde_json::from_value(result.output().unwrap().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_repository_without_commits_is_empty() {
        if !git_available() {
            return;
        }
        let (_dir, root) = empty_repo();
        let result = log(root, ToolCall::new(GIT_LOG)).await;
        assert!(result.is_success(), "{:?}", result.error());
        assert!(report(&result).commits.is_empty());
    }

    #[tokio::test]
    async fn test_commit_fields() {
        if !git_available() {
            return;
        }
        let (dir, root) = repo_with_commit();
        git(
            dir.path(),
            &["commit", "-q", "--allow-empty", "-m", "Second", "-m", "With a body"],
        );

        let commits = report(&log(root, ToolCall::new(GIT_LOG)).await).commits;
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].subject, "Second");
        assert_eq!(commits[0].body, "With a body");
        assert_eq!(commits[0].author, "Test User");
        assert_eq!(commits[0].email, "test@example.com");
        assert_eq!(commits[0].hash.len(), 40);
        assert_eq!(commits[1].subject, "Initial commit");
    }

    #[tokio::test]
    async fn test_default_limit_caps_at_one_hundred() {
        if !git_available() {
            return;
        }
        let (dir, root) = repo_with_commit();
        for i in 0..105 {
            git(
                dir.path(),
                &["commit", "-q", "--allow-empty", "-m", &format!("Commit {}", i)],
            );
        }

        let result = log(root.clone(), ToolCall::new(GIT_LOG).with_arg("maxEntries", 0)).await;
        let commits = report(&result).commits;
        assert_eq!(commits.len(), 100);
        assert_eq!(commits[0].subject, "Commit 104");
        assert_eq!(result.metadata.entries, Some(100));

        let limited = log(root, ToolCall::new(GIT_LOG).with_arg("maxEntries", 3)).await;
        let subjects: Vec<String> = report(&limited)
            .commits
            .into_iter()
            .map(|c| c.subject)
            .collect();
        assert_eq!(subjects, vec!["Commit 104", "Commit 103", "Commit 102"]);
    }

    #[tokio::test]
    async fn test_limit_beyond_int_range_returns_all_commits() {
        if !git_available() {
            return;
        }
        let (dir, root) = repo_with_commit();
        git(dir.path(), &["commit", "-q", "--allow-empty", "-m", "Second"]);

        for max in [3_i64, 4_294_967_296, 4_294_967_297, i64::MAX] {
            let result = log(root.clone(), ToolCall::new(GIT_LOG).with_arg("maxEntries", max)).await;
            assert_eq!(report(&result).commits.len(), 2, "maxEntries = {}", max);
        }
    }

    #[tokio::test]
    async fn test_not_a_repository_is_tool_error() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let root = Arc::new(crate::workspace::open_root(dir.path()).unwrap());
        let result = log(root, ToolCall::new(GIT_LOG)).await;
        assert_eq!(result.error().unwrap().code, "EXECUTION_FAILED");
    }
}
