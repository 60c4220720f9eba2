//! Normalized path handling for cross-platform output paths

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A path normalized to use forward slashes internally.
///
/// Output paths come from config files and the command line, and are echoed
/// back in reports, so they keep the user's spelling (relative stays
/// relative) with separators unified. Conversion to the platform form
/// happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the base, mirroring [`Path::join`].
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        if self.inner.is_empty() || Path::new(&segment).is_absolute() {
            return Self { inner: segment };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Get the parent directory, if the path has one.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the lowercased final extension, without the dot.
    ///
    /// Dotfiles such as `.env` have no extension.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) if idx + 1 == name.len() => None,
            Some(idx) => Some(name[idx + 1..].to_ascii_lowercase()),
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Resolve to an absolute, canonical path.
    ///
    /// The leaf does not need to exist: when it is missing, the nearest
    /// existing ancestor is canonicalized and the remaining components are
    /// appended unchanged.
    pub fn canonicalize(&self) -> std::io::Result<PathBuf> {
        let native = self.to_native();
        let absolute = if native.is_absolute() {
            native
        } else {
            std::env::current_dir()?.join(native)
        };

        let mut existing = absolute.as_path();
        let mut tail = Vec::new();
        while !existing.exists() {
            match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    existing = parent;
                }
                _ => break,
            }
        }

        let mut resolved = dunce::canonicalize(existing)?;
        for component in tail.into_iter().rev() {
            resolved.push(component);
        }
        Ok(resolved)
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslashes_are_normalized() {
        let path = NormalizedPath::new("src\\authz\\resources.ts");
        assert_eq!(path.as_str(), "src/authz/resources.ts");
    }

    #[test]
    fn extension_is_lowercased_final_suffix() {
        assert_eq!(
            NormalizedPath::new("gen/types.d.TS").extension().as_deref(),
            Some("ts")
        );
        assert_eq!(NormalizedPath::new("gen/.env").extension(), None);
        assert_eq!(NormalizedPath::new("Makefile").extension(), None);
        assert_eq!(NormalizedPath::new("trailing.").extension(), None);
    }

    #[test]
    fn join_and_parent() {
        let base = NormalizedPath::new("project");
        let joined = base.join("src/models.py");
        assert_eq!(joined.as_str(), "project/src/models.py");
        assert_eq!(joined.parent().unwrap().as_str(), "project/src");
        assert_eq!(joined.file_name(), Some("models.py"));
        assert!(NormalizedPath::new("models.py").parent().is_none());
    }

    #[test]
    fn canonicalize_tolerates_missing_leaf() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("missing/dir/file.py"));
        let resolved = path.canonicalize().unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("missing/dir/file.py"));
    }
}
