//! Lexical path resolution against the workspace root
//!
//! Resolution here never touches the filesystem. It is the fast reject in
//! front of the confined open performed by the infrastructure layer.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Why a caller-supplied path was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathDenied {
    #[error("path is required")]
    Required,

    #[error("access denied: path contains invalid characters: {0:?}")]
    InvalidCharacter(String),

    #[error("access denied: path is outside workspace: {0}")]
    OutsideWorkspace(String),

    #[error("access denied: path escaping detected: {0}")]
    Escaping(String),
}

/// How an empty input path is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPath {
    /// Empty means the workspace root (listing)
    Root,
    /// Empty is an error (reading)
    Reject,
}

/// A workspace-relative path that has passed escape validation.
///
/// Always relative and lexically clean: no `.` segments and no `..`
/// segments. The workspace root itself is the empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self(path)
    }

    /// The workspace root
    pub fn root() -> Self {
        Self(PathBuf::new())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Number of path segments below the root
    pub fn depth(&self) -> usize {
        self.0.components().count()
    }

    /// Extend by one directory entry name.
    ///
    /// Returns `None` unless `name` is exactly one normal segment.
    pub fn child(&self, name: &OsStr) -> Option<Self> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(segment)), None) => Some(Self(self.0.join(segment))),
            _ => None,
        }
    }

    /// `/`-separated form; the root renders as `.`
    pub fn to_slash_string(&self) -> String {
        if self.is_root() {
            return ".".to_string();
        }
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl std::fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}

/// Collapse `.` and `..` segments without touching the filesystem.
///
/// A `..` that cannot be collapsed is kept for relative paths, so an
/// escaping path stays visibly escaping. At a root it is dropped, as
/// `/..` is `/`.
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}

/// Resolve raw caller input into a [`ResolvedPath`] relative to `root`.
///
/// `root` and `canonical_root` must both be absolute. Absolute input is
/// accepted when it lies under either of them.
pub(crate) fn resolve(
    root: &Path,
    canonical_root: &Path,
    raw: &str,
    empty: EmptyPath,
) -> Result<ResolvedPath, PathDenied> {
    if raw.contains('\0') {
        return Err(PathDenied::InvalidCharacter(raw.replace('\0', "\\0")));
    }
    if raw.is_empty() {
        return match empty {
            EmptyPath::Root => Ok(ResolvedPath::root()),
            EmptyPath::Reject => Err(PathDenied::Required),
        };
    }

    let input = Path::new(raw);
    let relative = if input.is_absolute() {
        let cleaned = normalize_lexical(input);
        let under = |base: &Path| {
            cleaned
                .strip_prefix(normalize_lexical(base))
                .ok()
                .map(Path::to_path_buf)
        };
        match under(root).or_else(|| under(canonical_root)) {
            Some(rel) => rel,
            None => return Err(PathDenied::OutsideWorkspace(raw.to_string())),
        }
    } else {
        normalize_lexical(input)
    };

    match relative.components().next() {
        Some(Component::ParentDir) => Err(PathDenied::Escaping(raw.to_string())),
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {
            Err(PathDenied::OutsideWorkspace(raw.to_string()))
        }
        _ => Ok(ResolvedPath::new(relative)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_in_work(raw: &str) -> Result<ResolvedPath, PathDenied> {
        resolve(
            Path::new("/work"),
            Path::new("/private/work"),
            raw,
            EmptyPath::Reject,
        )
    }

    #[test]
    fn test_normalize_lexical() {
        assert_eq!(normalize_lexical(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_lexical(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize_lexical(Path::new("/../etc")), PathBuf::from("/etc"));
        assert_eq!(normalize_lexical(Path::new("./")), PathBuf::new());
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(resolve_in_work("src/lib.rs").unwrap().as_path(), Path::new("src/lib.rs"));
        assert_eq!(resolve_in_work("src/../Cargo.toml").unwrap().to_slash_string(), "Cargo.toml");
        assert!(resolve_in_work(".").unwrap().is_root());
    }

    #[test]
    fn test_escaping_is_denied() {
        assert!(matches!(resolve_in_work(".."), Err(PathDenied::Escaping(_))));
        assert!(matches!(resolve_in_work("../secret"), Err(PathDenied::Escaping(_))));
        assert!(matches!(resolve_in_work("a/../../b"), Err(PathDenied::Escaping(_))));
    }

    #[test]
    fn test_absolute_paths() {
        assert_eq!(resolve_in_work("/work/src/main.rs").unwrap().to_slash_string(), "src/main.rs");
        assert_eq!(resolve_in_work("/private/work/a.txt").unwrap().to_slash_string(), "a.txt");
        assert!(resolve_in_work("/work").unwrap().is_root());
        assert!(matches!(resolve_in_work("/etc/passwd"), Err(PathDenied::OutsideWorkspace(_))));
        assert!(matches!(resolve_in_work("/workspace/a"), Err(PathDenied::OutsideWorkspace(_))));
    }

    #[test]
    fn test_absolute_traversal_is_denied() {
        let err = resolve_in_work("/work/secret/../../etc/passwd").unwrap_err();
        assert_eq!(err, PathDenied::OutsideWorkspace("/work/secret/../../etc/passwd".into()));
        assert!(err.to_string().starts_with("access denied"));
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(resolve_in_work(""), Err(PathDenied::Required));
        let listed = resolve(Path::new("/work"), Path::new("/work"), "", EmptyPath::Root).unwrap();
        assert!(listed.is_root());
        assert_eq!(listed.to_string(), ".");
    }

    #[test]
    fn test_nul_byte_is_denied() {
        assert!(matches!(resolve_in_work("a\0b"), Err(PathDenied::InvalidCharacter(_))));
    }

    #[test]
    fn test_child() {
        let dir = resolve_in_work("src").unwrap();
        let child = dir.child(OsStr::new("lib.rs")).unwrap();
        assert_eq!(child.to_slash_string(), "src/lib.rs");
        assert_eq!(child.depth(), 2);
        assert!(dir.child(OsStr::new("..")).is_none());
        assert!(dir.child(OsStr::new("a/b")).is_none());
        assert_eq!(ResolvedPath::root().child(OsStr::new("x")).unwrap().depth(), 1);
    }
}
