//! Workspace domain module
//!
//! Pure path and range logic for sandboxed workspace access:
//!
//! - [`WorkspaceRoot`] — the directory every tool is confined to
//! - [`ResolvedPath`] — a caller path that passed escape validation; only
//!   [`WorkspaceRoot::resolve`] constructs one
//! - [`ReadRequest`] — offset/length validation and window clamping
//!
//! Resolution is lexical. The authoritative boundary is the confined open
//! in the infrastructure layer, which also resolves symlinks.

pub mod limits;
pub mod path;
pub mod root;

pub use limits::{
    DEFAULT_LIST_DEPTH, DEFAULT_READ_LENGTH, MAX_READ_LENGTH, ReadRangeError, ReadRequest,
    ReadWindow, effective_depth,
};
pub use path::{EmptyPath, PathDenied, ResolvedPath, normalize_lexical};
pub use root::WorkspaceRoot;
