//! Version-control query results

use serde::{Deserialize, Serialize};

/// Commits returned by a log query when the caller gives no (or a
/// non-positive) limit
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 100;

/// Diff output beyond this many bytes is cut and flagged as truncated
pub const DEFAULT_MAX_DIFF_BYTES: usize = 1024 * 1024;

/// Working tree status split into two disjoint, sorted sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Paths changed in the worktree or the index
    pub modified: Vec<String>,
    /// Paths not tracked by the repository
    pub untracked: Vec<String>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.untracked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modified.len() + self.untracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }

    /// Keep only paths under `prefix`, rewritten relative to it.
    ///
    /// `prefix` is the workspace location inside the repository as printed by
    /// `git rev-parse --show-prefix`: empty at the top level, otherwise ending
    /// in `/`.
    pub fn scoped_to(self, prefix: &str) -> Self {
        if prefix.is_empty() {
            return self;
        }
        Self {
            modified: strip_scope(self.modified, prefix),
            untracked: strip_scope(self.untracked, prefix),
        }
    }
}

fn strip_scope(paths: Vec<String>, prefix: &str) -> Vec<String> {
    paths
        .into_iter()
        .filter_map(|p| p.strip_prefix(prefix).map(str::to_string))
        .filter(|p| !p.is_empty())
        .collect()
}

/// One commit from the current branch history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Full commit hash
    pub hash: String,
    pub author: String,
    pub email: String,
    /// Author date, strict ISO 8601
    pub date: String,
    /// First line of the message
    pub subject: String,
    /// Remainder of the message, empty when there is none
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReport {
    /// Newest first
    pub commits: Vec<CommitSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Unified diff text
    pub result: String,
    /// Whether `result` was cut at the configured size limit
    pub truncated: bool,
}

/// Largest count git accepts for `--max-count` (parsed as a C `int`)
pub const MAX_LOG_COUNT: usize = i32::MAX as usize;

/// Log limit for a caller value; non-positive selects the default.
/// Large values saturate at [`MAX_LOG_COUNT`] instead of wrapping inside git.
pub fn effective_max_entries(max_entries: i64) -> usize {
    if max_entries <= 0 {
        DEFAULT_MAX_LOG_ENTRIES
    } else {
        usize::try_from(max_entries)
            .unwrap_or(usize::MAX)
            .min(MAX_LOG_COUNT)
    }
}
