//! Scratch working copies of the remote repository

use std::path::{Path, PathBuf};

use aicfg_fs::{NormalizedPath, normalize_relative_dir};
use tempfile::TempDir;

use crate::{Error, Result};

/// Temp-dir prefix for sync clones.
pub const SYNC_PREFIX: &str = "ai-config-sync-";
/// Temp-dir prefix for push clones.
pub const PUSH_PREFIX: &str = "ai-config-push-";

/// Validate a remote directory given relative to the repository root.
///
/// # Errors
///
/// [`Error::InvalidRemoteDir`] if the input is absolute or contains `..`.
pub fn normalize_remote_dir(input: &str) -> Result<NormalizedPath> {
    normalize_relative_dir(input).map_err(|e| match e {
        aicfg_fs::Error::InvalidPath { path, reason } => Error::InvalidRemoteDir {
            input: path,
            reason,
        },
        other => other.into(),
    })
}

/// A temporary directory that holds one clone and is removed when dropped.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new(prefix: &str) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        tracing::debug!(path = %dir.path().display(), "Created scratch directory");
        Ok(Self { dir })
    }

    /// Where the clone goes (not created yet).
    pub fn repo_path(&self) -> PathBuf {
        self.dir.path().join("repo")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// `<repo>/<remote_dir>`, with `"."` meaning the repository root itself.
pub fn remote_root(repo: &Path, remote_dir: &NormalizedPath) -> PathBuf {
    if remote_dir.is_current_dir() {
        repo.to_path_buf()
    } else {
        repo.join(remote_dir.to_native())
    }
}
