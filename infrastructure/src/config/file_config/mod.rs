//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod git;
mod invocation;
mod logging;
mod output;

pub use git::FileGitConfig;
pub use invocation::{DEFAULT_INVOCATION_TIMEOUT_SECS, FileInvocationConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;

use crate::tools::git::GitSettings;
use codelens_domain::config::validation::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Git executable and limits
    pub git: FileGitConfig,
    /// Per tool call settings
    pub invocation: FileInvocationConfig,
    /// Structured invocation log
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.git.to_git_settings().1);
        issues
    }

    /// Git settings with invalid fields replaced by defaults
    pub fn git_settings(&self) -> GitSettings {
        self.git.to_git_settings().0
    }
}
