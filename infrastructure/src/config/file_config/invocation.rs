//! Invocation configuration from TOML (`[invocation]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default limit for a single tool call
pub const DEFAULT_INVOCATION_TIMEOUT_SECS: u64 = 60;

/// Raw invocation configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInvocationConfig {
    /// Per tool call timeout in seconds; 0 disables it
    pub timeout_secs: u64,
}

impl Default for FileInvocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_INVOCATION_TIMEOUT_SECS,
        }
    }
}

impl FileInvocationConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
