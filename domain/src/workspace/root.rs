//! Workspace root value object

use super::path::{self, EmptyPath, PathDenied, ResolvedPath};
use std::path::{Path, PathBuf};

/// The directory every tool operation is confined to.
///
/// Established once at startup and shared read-only. Holds the root as
/// given and its canonical (symlink-free) form; the canonical form is the
/// confinement boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    path: PathBuf,
    canonical: PathBuf,
}

impl WorkspaceRoot {
    /// Both paths must be absolute; `canonical` is `path` with symlinks resolved.
    pub fn new(path: impl Into<PathBuf>, canonical: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            canonical: canonical.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn canonical(&self) -> &Path {
        &self.canonical
    }

    /// Validate caller input and turn it into a [`ResolvedPath`]
    pub fn resolve(&self, raw: &str, empty: EmptyPath) -> Result<ResolvedPath, PathDenied> {
        path::resolve(&self.path, &self.canonical, raw, empty)
    }

    /// Host path for a resolved path, under the canonical root
    pub fn host_path(&self, resolved: &ResolvedPath) -> PathBuf {
        if resolved.is_root() {
            self.canonical.clone()
        } else {
            self.canonical.join(resolved.as_path())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_and_host_path() {
        let root = WorkspaceRoot::new("/work", "/work");
        let resolved = root.resolve("docs/./guide.md", EmptyPath::Reject).unwrap();
        assert_eq!(root.host_path(&resolved), PathBuf::from("/work/docs/guide.md"));
        assert_eq!(root.host_path(&ResolvedPath::root()), PathBuf::from("/work"));
    }

    #[test]
    fn test_resolve_denies_escape() {
        let root = WorkspaceRoot::new("/work", "/work");
        assert!(root.resolve("../../etc/passwd", EmptyPath::Root).is_err());
        assert!(root.resolve("/etc", EmptyPath::Root).is_err());
    }
}
