//! Tracked configuration directories and fixed on-disk names.

use std::path::Path;

use serde::{Serialize, Serializer};

/// Name of the hidden directory holding backup snapshots inside a project.
pub const BACKUP_ROOT_NAME: &str = ".ai-config-backup";

/// AI-IDE configuration directories managed by ai-config.
///
/// The set is closed: sync, push, backup and restore all iterate
/// [`TrackedDir::ALL`] in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedDir {
    /// The `.cursor` directory (Cursor rules and settings)
    Cursor,
    /// The `.claude` directory (Claude agents, commands and settings)
    Claude,
}

impl TrackedDir {
    /// Every tracked directory, in the fixed processing order.
    pub const ALL: [TrackedDir; 2] = [TrackedDir::Cursor, TrackedDir::Claude];

    /// Get the directory name as it appears on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cursor => ".cursor",
            Self::Claude => ".claude",
        }
    }
}

impl AsRef<Path> for TrackedDir {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for TrackedDir {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for TrackedDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for TrackedDir {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
