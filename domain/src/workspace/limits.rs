//! Read window and listing depth arithmetic

use thiserror::Error;

/// Window size used when the caller gives no (or a non-positive) length
pub const DEFAULT_READ_LENGTH: u64 = 32 * 1024;

/// Largest window a single read returns; larger requests are clamped
pub const MAX_READ_LENGTH: u64 = 128 * 1024;

/// Listing depth used when the caller gives no (or a non-positive) depth
pub const DEFAULT_LIST_DEPTH: usize = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadRangeError {
    #[error("offset must be non-negative, got {0}")]
    NegativeOffset(i64),
}

/// A validated read request: offset plus a clamped length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    offset: u64,
    length: u64,
}

/// The byte range actually read from a file of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadWindow {
    pub offset: u64,
    pub len: u64,
}

impl ReadRequest {
    pub fn new(offset: i64, length: i64) -> Result<Self, ReadRangeError> {
        if offset < 0 {
            return Err(ReadRangeError::NegativeOffset(offset));
        }
        let length = if length <= 0 {
            DEFAULT_READ_LENGTH
        } else {
            (length as u64).min(MAX_READ_LENGTH)
        };
        Ok(Self {
            offset: offset as u64,
            length,
        })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Clamp the request to a file of `total` bytes.
    ///
    /// An offset at or past the end yields an empty window.
    pub fn window(&self, total: u64) -> ReadWindow {
        let len = if self.offset >= total {
            0
        } else {
            self.length.min(total - self.offset)
        };
        ReadWindow {
            offset: self.offset,
            len,
        }
    }
}

/// Depth limit for a listing; non-positive means direct children only
pub fn effective_depth(depth: i64) -> usize {
    if depth <= 0 {
        DEFAULT_LIST_DEPTH
    } else {
        usize::try_from(depth).unwrap_or(usize::MAX)
    }
}
