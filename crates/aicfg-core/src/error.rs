//! Error types for aicfg-core

use std::path::PathBuf;

/// Result type for aicfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories surfaced to callers.
///
/// Every [`Error`] maps onto exactly one kind via [`Error::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required path or snapshot does not exist
    NotFound,
    /// A safety check refused to proceed (e.g. uncommitted local edits)
    PreconditionBlocked,
    /// Clone, commit or push failed
    TransportFailure,
    /// Reading, copying or deleting files failed
    IoFailure,
    /// A user-supplied value was rejected
    InvalidInput,
}

/// Errors that can occur in aicfg-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Target project directory does not exist
    #[error("Target path {path} does not exist")]
    TargetNotFound { path: PathBuf },

    /// Configuration directory missing from the cloned repository
    #[error(
        "Remote directory '{remote_dir}' not found in repository. \
         Use 'ai-config push' to initialize it first."
    )]
    RemoteDirNotFound { remote_dir: String, path: PathBuf },

    /// No tracked directory exists locally
    #[error("No local .cursor/.claude directories found in {path}. Nothing to push.")]
    NothingToPush { path: PathBuf },

    /// Requested backup snapshot does not exist
    #[error("Backup snapshot {id} not found at {path}")]
    SnapshotNotFound { id: String, path: PathBuf },

    /// Tracked directories have uncommitted edits
    #[error(
        "Local changes detected in .cursor/.claude under {path}. \
         Commit or stash, or rerun with --force."
    )]
    UncommittedChanges { path: PathBuf },

    /// Remote directory is absolute or escapes the repository
    #[error("Invalid remote directory '{input}': {reason}")]
    InvalidRemoteDir { input: String, reason: String },

    /// Snapshot id does not follow the `YYYYMMDD-HHMMSS` scheme
    #[error("Invalid snapshot id '{value}': expected YYYYMMDD-HHMMSS")]
    InvalidSnapshotId { value: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from aicfg-fs
    #[error(transparent)]
    Fs(#[from] aicfg_fs::Error),

    /// Git error from aicfg-git
    #[error(transparent)]
    Git(#[from] aicfg_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TargetNotFound { .. }
            | Self::RemoteDirNotFound { .. }
            | Self::NothingToPush { .. }
            | Self::SnapshotNotFound { .. } => ErrorKind::NotFound,
            Self::UncommittedChanges { .. } => ErrorKind::PreconditionBlocked,
            Self::InvalidRemoteDir { .. } | Self::InvalidSnapshotId { .. } => {
                ErrorKind::InvalidInput
            }
            Self::Git(aicfg_git::Error::Fs(_)) => ErrorKind::IoFailure,
            Self::Git(_) => ErrorKind::TransportFailure,
            Self::Fs(_) | Self::Io(_) | Self::TomlDe(_) | Self::TomlSer(_) => ErrorKind::IoFailure,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::PreconditionBlocked => "precondition-blocked",
            Self::TransportFailure => "transport-failure",
            Self::IoFailure => "io-failure",
            Self::InvalidInput => "invalid-input",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
