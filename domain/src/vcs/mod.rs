//! Version-control domain module
//!
//! Result shapes for status, log and diff queries plus parsers for the
//! machine-readable git output they are built from. Running git is an
//! infrastructure concern.

pub mod entities;
pub mod parsing;

pub use entities::{
    CommitSummary, DEFAULT_MAX_DIFF_BYTES, DEFAULT_MAX_LOG_ENTRIES, DiffReport, LogReport,
    MAX_LOG_COUNT, StatusReport, effective_max_entries,
};
pub use parsing::{LOG_FORMAT, VcsParseError, parse_log, parse_porcelain_status};
