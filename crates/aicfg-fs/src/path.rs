//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path stored with forward slashes, converted back to a native
/// `PathBuf` only when it is handed to the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Last path component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.trim_end_matches('/').rsplit('/').next()
    }

    /// Whether this is the relative path `"."`.
    pub fn is_current_dir(&self) -> bool {
        self.inner == "."
    }

    /// Extension of the last component; dotfiles such as `.claude` have none.
    pub fn extension(&self) -> Option<&str> {
        match self.file_name()?.rsplit_once('.') {
            Some(("", _)) | None => None,
            Some((_, ext)) => Some(ext),
        }
    }
}

/// Normalize a directory given relative to a repository root.
///
/// Empty input and `"."` resolve to `"."`. Absolute paths and any `..`
/// component are rejected so the result can never escape the root it is
/// joined onto.
pub fn normalize_relative_dir(input: &str) -> Result<NormalizedPath> {
    let candidate = input.trim().replace('\\', "/");

    let has_drive_prefix = candidate.len() >= 2 && candidate.as_bytes()[1] == b':';
    if candidate.starts_with('/') || has_drive_prefix || Path::new(&candidate).is_absolute() {
        return Err(Error::InvalidPath {
            path: input.to_string(),
            reason: "must be relative to the repository root".into(),
        });
    }

    let mut parts = Vec::new();
    for part in candidate.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(Error::InvalidPath {
                    path: input.to_string(),
                    reason: "cannot traverse parent folders".into(),
                });
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        Ok(NormalizedPath::new("."))
    } else {
        Ok(NormalizedPath::new(parts.join("/")))
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
