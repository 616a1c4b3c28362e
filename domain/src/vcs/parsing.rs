//! Parsers for machine-readable git output

use super::entities::{CommitSummary, StatusReport};
use std::collections::BTreeSet;
use thiserror::Error;

/// Field separator inside a log record (ASCII unit separator)
const FIELD_SEP: char = '\x1f';

/// Record terminator between commits (ASCII record separator)
const RECORD_SEP: char = '\x1e';

/// `--format` argument matching [`parse_log`]
pub const LOG_FORMAT: &str = "%H%x1f%an%x1f%ae%x1f%aI%x1f%s%x1f%b%x1e";

const LOG_FIELDS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VcsParseError {
    #[error("malformed status entry: {0:?}")]
    MalformedStatus(String),

    #[error("malformed log record: expected 6 fields, got {0}")]
    MalformedLog(usize),
}

/// Parse `git status --porcelain=v1 -z` output.
///
/// Each entry is `XY <path>\0`; renames and copies append `<source>\0`,
/// which is skipped so the destination is reported. `??` entries are
/// untracked, `!!` (ignored) entries are dropped, anything else with a
/// non-blank index or worktree state is modified.
pub fn parse_porcelain_status(output: &[u8]) -> Result<StatusReport, VcsParseError> {
    let mut modified = BTreeSet::new();
    let mut untracked = BTreeSet::new();

    let mut entries = output.split(|b| *b == 0).filter(|e| !e.is_empty());
    while let Some(entry) = entries.next() {
        if entry.len() < 4 || entry[2] != b' ' {
            return Err(VcsParseError::MalformedStatus(
                String::from_utf8_lossy(entry).into_owned(),
            ));
        }
        let (index, worktree) = (entry[0], entry[1]);
        let path = String::from_utf8_lossy(&entry[3..]).into_owned();

        if matches!(index, b'R' | b'C') || matches!(worktree, b'R' | b'C') {
            entries.next();
        }

        match (index, worktree) {
            (b'?', b'?') => {
                untracked.insert(path);
            }
            (b'!', b'!') => {}
            (b' ', b' ') => {}
            _ => {
                modified.insert(path);
            }
        }
    }

    Ok(StatusReport {
        modified: modified.into_iter().collect(),
        untracked: untracked.into_iter().collect(),
    })
}

/// Parse `git log --format=` [`LOG_FORMAT`] output, newest first as given
pub fn parse_log(output: &str) -> Result<Vec<CommitSummary>, VcsParseError> {
    output
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.is_empty())
        .map(parse_log_record)
        .collect()
}

fn parse_log_record(record: &str) -> Result<CommitSummary, VcsParseError> {
    let fields: Vec<&str> = record.splitn(LOG_FIELDS, FIELD_SEP).collect();
    let [hash, author, email, date, subject, body] = fields.as_slice() else {
        return Err(VcsParseError::MalformedLog(fields.len()));
    };
    Ok(CommitSummary {
        hash: hash.to_string(),
        author: author.to_string(),
        email: email.to_string(),
        date: date.to_string(),
        subject: subject.to_string(),
        body: body.trim_end().to_string(),
    })
}
