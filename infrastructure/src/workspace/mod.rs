//! Workspace root opening and confined path resolution.
//!
//! [`open_current_dir`] establishes the process-wide [`WorkspaceRoot`] once
//! at startup. [`confine`] is the authoritative boundary every filesystem
//! tool goes through: the lexical checks in the domain are a fast reject,
//! this resolves symlinks and refuses anything that lands outside the
//! canonical root.

use codelens_domain::tool::value_objects::ToolError;
use codelens_domain::workspace::{EmptyPath, PathDenied, ResolvedPath, WorkspaceRoot};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Structural failure opening the workspace root
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("Cannot open workspace root {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Workspace root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Operational failure resolving a caller path
#[derive(Error, Debug)]
pub enum ConfinementError {
    #[error(transparent)]
    Denied(#[from] PathDenied),

    #[error("access denied: path resolves outside workspace: {0}")]
    Escapes(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("cannot resolve {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl From<ConfinementError> for ToolError {
    fn from(err: ConfinementError) -> Self {
        match err {
            ConfinementError::Denied(PathDenied::Required) => {
                ToolError::invalid_argument(err.to_string())
            }
            ConfinementError::Denied(_) | ConfinementError::Escapes(_) => {
                ToolError::access_denied(err.to_string())
            }
            ConfinementError::NotFound(path) => ToolError::not_found(path),
            ConfinementError::Io { .. } => ToolError::execution_failed(err.to_string()),
        }
    }
}

/// A path that passed lexical validation and resolved inside the root
#[derive(Debug, Clone)]
pub struct ConfinedPath {
    /// Workspace-relative form, as reported back to callers
    pub resolved: ResolvedPath,
    /// Canonical host path, under the canonical root
    pub host: PathBuf,
}

/// Open the process working directory as the workspace root
pub fn open_current_dir() -> Result<WorkspaceRoot, WorkspaceError> {
    let cwd = std::env::current_dir().map_err(WorkspaceError::CurrentDir)?;
    open_root(&cwd)
}

/// Open `path` as the workspace root
pub fn open_root(path: &Path) -> Result<WorkspaceRoot, WorkspaceError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(WorkspaceError::CurrentDir)?
            .join(path)
    };

    let canonical = absolute
        .canonicalize()
        .map_err(|source| WorkspaceError::Open {
            path: absolute.clone(),
            source,
        })?;
    if !canonical.is_dir() {
        return Err(WorkspaceError::NotADirectory(absolute));
    }

    debug!(
        root = %absolute.display(),
        canonical = %canonical.display(),
        "Opened workspace root"
    );
    Ok(WorkspaceRoot::new(absolute, canonical))
}

/// Resolve caller input to an existing path confined to the workspace.
pub fn resolve_confined(
    root: &WorkspaceRoot,
    raw: &str,
    empty: EmptyPath,
) -> Result<ConfinedPath, ConfinementError> {
    let resolved = root.resolve(raw, empty)?;
    let host = confine(root, &resolved)?;
    Ok(ConfinedPath { resolved, host })
}

/// Resolve symlinks and require the result to stay under the canonical root.
pub fn confine(root: &WorkspaceRoot, resolved: &ResolvedPath) -> Result<PathBuf, ConfinementError> {
    let joined = root.host_path(resolved);
    let canonical = match joined.canonicalize() {
        Ok(path) => path,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfinementError::NotFound(resolved.to_string()));
        }
        Err(source) => {
            return Err(ConfinementError::Io {
                path: resolved.to_string(),
                source,
            });
        }
    };

    if !canonical.starts_with(root.canonical()) {
        debug!(
            path = %resolved,
            target = %canonical.display(),
            "Refused path resolving outside workspace"
        );
        return Err(ConfinementError::Escapes(resolved.to_string()));
    }
    Ok(canonical)
}
