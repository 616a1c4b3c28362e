//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one record per tool call and result.
    /// A leading `~/` is expanded to the home directory.
    pub invocation_log: Option<String>,
}

impl FileLoggingConfig {
    /// Expanded invocation log path, if one is configured
    pub fn invocation_log_path(&self) -> Option<PathBuf> {
        let raw = self.invocation_log.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(rest) = raw.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return Some(home.join(rest));
        }
        Some(PathBuf::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_log_path() {
        let none = FileLoggingConfig::default();
        assert!(none.invocation_log_path().is_none());

        let blank = FileLoggingConfig {
            invocation_log: Some("  ".to_string()),
        };
        assert!(blank.invocation_log_path().is_none());

        let plain = FileLoggingConfig {
            invocation_log: Some("/var/log/codelens.jsonl".to_string()),
        };
        assert_eq!(
            plain.invocation_log_path(),
            Some(PathBuf::from("/var/log/codelens.jsonl"))
        );

        let home = FileLoggingConfig {
            invocation_log: Some("~/codelens.jsonl".to_string()),
        };
        if let Some(dir) = dirs::home_dir() {
            assert_eq!(home.invocation_log_path(), Some(dir.join("codelens.jsonl")));
        }
    }
}
