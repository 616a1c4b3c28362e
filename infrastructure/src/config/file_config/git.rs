//! Git configuration from TOML (`[git]` section)

use crate::tools::git::{DEFAULT_GIT_TIMEOUT, GitSettings};
use codelens_domain::config::validation::{ConfigIssue, ConfigIssueCode};
use codelens_domain::vcs::DEFAULT_MAX_DIFF_BYTES;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Git tool configuration from TOML.
///
/// # Example
///
/// ```toml
/// [git]
/// program = "/usr/bin/git"
/// timeout_secs = 10
/// max_diff_bytes = 262144
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGitConfig {
    /// Executable name or path
    pub program: String,
    /// Per-process timeout in seconds; 0 disables it
    pub timeout_secs: u64,
    /// Cap on GitDiff output
    pub max_diff_bytes: usize,
}

impl Default for FileGitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout_secs: DEFAULT_GIT_TIMEOUT.as_secs(),
            max_diff_bytes: DEFAULT_MAX_DIFF_BYTES,
        }
    }
}

impl FileGitConfig {
    /// Convert to [`GitSettings`], returning validation issues.
    ///
    /// Invalid fields fall back to their defaults.
    pub fn to_git_settings(&self) -> (GitSettings, Vec<ConfigIssue>) {
        let defaults = GitSettings::default();
        let mut issues = Vec::new();

        let program = self.program.trim();
        let program = if program.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "git.program".to_string(),
                },
                format!("git.program is empty, using '{}'", defaults.program),
            ));
            defaults.program
        } else {
            program.to_string()
        };

        let max_diff_bytes = if self.max_diff_bytes == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "git.max_diff_bytes".to_string(),
                    value: "0".to_string(),
                },
                format!(
                    "git.max_diff_bytes must be positive, using {}",
                    defaults.max_diff_bytes
                ),
            ));
            defaults.max_diff_bytes
        } else {
            self.max_diff_bytes
        };

        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));

        (
            GitSettings {
                program,
                timeout,
                max_diff_bytes,
            },
            issues,
        )
    }
}
