//! Version-control tools: GitStatus, GitLog, GitDiff
//!
//! All three shell out to the `git` executable through [`GitRunner`], run
//! from the workspace root. The runner never issues writes:
//! `GIT_OPTIONAL_LOCKS=0` keeps `git status` from refreshing the index, and
//! caller-supplied revisions and paths are placed after `--end-of-options`
//! and `--` so they can never be parsed as options.

mod diff;
mod log;
mod status;

pub use diff::{GIT_DIFF, GitDiffTool, git_diff_definition};
pub use log::{GIT_LOG, GitLogTool, git_log_definition};
pub use status::{GIT_STATUS, GitStatusTool, git_status_definition};

use codelens_application::InvocationContext;
use codelens_domain::tool::value_objects::ToolError;
use codelens_domain::vcs::{DEFAULT_MAX_DIFF_BYTES, VcsParseError};
use codelens_domain::workspace::WorkspaceRoot;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Default per-invocation limit for a git process
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable '{0}' not found in PATH")]
    NotInstalled(String),

    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),

    #[error("git {command} failed: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("unexpected git output: {0}")]
    Parse(#[from] VcsParseError),

    #[error("git {command} timed out after {}s", timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },

    #[error("git invocation cancelled")]
    Cancelled,
}

impl GitError {
    /// Whether git rejected a revision or path the caller supplied
    fn is_unknown_object(&self) -> bool {
        match self {
            GitError::CommandFailed { stderr, .. } => {
                stderr.contains("unknown revision")
                    || stderr.contains("bad revision")
                    || stderr.contains("bad object")
                    || stderr.contains("did not match any file")
            }
            _ => false,
        }
    }
}

impl From<GitError> for ToolError {
    fn from(err: GitError) -> Self {
        match &err {
            GitError::Cancelled => ToolError::cancelled(),
            GitError::TimedOut { command, .. } => {
                ToolError::timeout(format!("git {}", command)).with_details(err.to_string())
            }
            _ if err.is_unknown_object() => ToolError::not_found(err.to_string()),
            _ => ToolError::execution_failed(err.to_string()),
        }
    }
}

/// Settings shared by the git tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSettings {
    /// Executable name or path
    pub program: String,
    /// Per-process limit; `None` disables it
    pub timeout: Option<Duration>,
    /// Cap on diff output
    pub max_diff_bytes: usize,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout: Some(DEFAULT_GIT_TIMEOUT),
            max_diff_bytes: DEFAULT_MAX_DIFF_BYTES,
        }
    }
}

/// Captured result of one git process
#[derive(Debug)]
pub struct GitOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: String,
    /// Stdout exceeded the requested limit and the process was stopped
    pub truncated: bool,
}

/// Runs git subcommands in the workspace root
#[derive(Debug, Clone)]
pub struct GitRunner {
    workdir: PathBuf,
    settings: GitSettings,
}

impl GitRunner {
    pub fn new(root: &WorkspaceRoot, settings: GitSettings) -> Self {
        Self {
            workdir: root.canonical().to_path_buf(),
            settings,
        }
    }

    pub fn settings(&self) -> &GitSettings {
        &self.settings
    }

    /// Run git and fail on a non-zero exit status
    pub async fn run_checked(
        &self,
        args: &[String],
        ctx: &InvocationContext,
    ) -> Result<GitOutput, GitError> {
        let output = self.run(args, None, ctx).await?;
        if !output.status.success() && !output.truncated {
            return Err(GitError::CommandFailed {
                command: command_label(args),
                code: output.status.code(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Run git, keeping at most `stdout_limit` bytes of stdout.
    ///
    /// The process is killed when the invocation is cancelled, when the
    /// configured timeout passes, or once stdout overflows the limit.
    pub async fn run(
        &self,
        args: &[String],
        stdout_limit: Option<usize>,
        ctx: &InvocationContext,
    ) -> Result<GitOutput, GitError> {
        ctx.check_cancelled().map_err(|_| GitError::Cancelled)?;

        let program = which::which(&self.settings.program)
            .map_err(|_| GitError::NotInstalled(self.settings.program.clone()))?;
        let command = command_label(args);
        debug!(command = %command, args = ?args, "Running git");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&self.workdir)
            .env("GIT_OPTIONAL_LOCKS", "0")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let child = cmd.spawn()?;

        let deadline = async {
            match self.settings.timeout {
                Some(limit) if !limit.is_zero() => tokio::time::sleep(limit).await,
                _ => std::future::pending::<()>().await,
            }
        };

        // Dropping `child` on the early branches kills the process
        tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                debug!(command = %command, "git cancelled");
                Err(GitError::Cancelled)
            }
            _ = deadline => {
                warn!(command = %command, "git timed out");
                Err(GitError::TimedOut {
                    command,
                    timeout: self.settings.timeout.unwrap_or_default(),
                })
            }
            output = collect(child, stdout_limit) => Ok(output?),
        }
    }
}

/// Drain both pipes and wait. Stderr is read on its own task so a chatty
/// stderr cannot stall stdout.
async fn collect(mut child: Child, stdout_limit: Option<usize>) -> std::io::Result<GitOutput> {
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("git stdout not captured"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("git stderr not captured"))?;

    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.map(|_| buf)
    });

    let mut out = Vec::new();
    match stdout_limit {
        Some(limit) => {
            (&mut stdout)
                .take(limit as u64 + 1)
                .read_to_end(&mut out)
                .await?;
        }
        None => {
            stdout.read_to_end(&mut out).await?;
        }
    }

    let truncated = stdout_limit.is_some_and(|limit| out.len() > limit);
    if truncated {
        // Nothing more will be read; stop git instead of waiting on a full pipe
        let _ = child.start_kill();
    }
    drop(stdout);

    let status = child.wait().await?;
    let stderr = stderr_task
        .await
        .map_err(std::io::Error::other)??;

    Ok(GitOutput {
        status,
        stdout: out,
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        truncated,
    })
}

/// First non-option argument, used in messages
fn command_label(args: &[String]) -> String {
    args.iter()
        .find(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| "git".to_string())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_command_label() {
        let args = vec!["--literal-pathspecs".to_string(), "diff".to_string()];
        assert_eq!(command_label(&args), "diff");
    }

    #[test]
    fn test_error_mapping() {
        let unknown = GitError::CommandFailed {
            command: "diff".into(),
            code: Some(128),
            stderr: "fatal: bad revision 'nope'".into(),
        };
        assert_eq!(ToolError::from(unknown).code, "NOT_FOUND");

        let other = GitError::CommandFailed {
            command: "status".into(),
            code: Some(128),
            stderr: "fatal: not a git repository".into(),
        };
        assert_eq!(ToolError::from(other).code, "EXECUTION_FAILED");
        assert_eq!(ToolError::from(GitError::Cancelled).code, "CANCELLED");
    }

    #[tokio::test]
    async fn test_missing_program_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = crate::workspace::open_root(dir.path()).unwrap();
        let runner = GitRunner::new(
            &root,
            GitSettings {
                program: "definitely-not-git-codelens".into(),
                ..Default::default()
            },
        );
        let err = runner
            .run_checked(&["status".to_string()], &InvocationContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GitError::NotInstalled(_)));
    }

    #[tokio::test]
    async fn test_stdout_limit_truncates() {
        if !git_available() {
            return;
        }
        let (_dir, root) = repo_with_commit();
        let runner = GitRunner::new(&root, GitSettings::default());
        let output = runner
            .run(
                &["log".to_string(), "--format=%H".to_string()],
                Some(8),
                &InvocationContext::new(),
            )
            .await
            .unwrap();
        assert!(output.truncated);
        assert_eq!(output.stdout.len(), 9);
    }

    #[tokio::test]
    async fn test_cancelled_before_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let root = crate::workspace::open_root(dir.path()).unwrap();
        let runner = GitRunner::new(&root, GitSettings::default());
        let ctx = InvocationContext::new();
        ctx.cancel();
        let err = runner
            .run(&["status".to_string()], None, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, GitError::Cancelled));
    }
}
