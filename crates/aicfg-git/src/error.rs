//! Error types for aicfg-git

use std::path::PathBuf;

/// Result type for aicfg-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in aicfg-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] aicfg_fs::Error),

    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Reference '{name}' not found in cloned repository")]
    RefNotFound { name: String },

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("Not a git working tree: {path}")]
    NotAWorkTree { path: PathBuf },
}
