//! Restore a project from a backup snapshot

use std::path::{Path, PathBuf};

use aicfg_fs::TrackedDir;
use tracing::info;

use crate::backup::{BackupManager, SnapshotId};
use crate::{Error, Result};

/// Restore every tracked directory captured in snapshot `id` into `target`.
///
/// Returns the snapshot path.
pub fn run_rollback(target: &Path, id: &SnapshotId) -> Result<PathBuf> {
    if !target.exists() {
        return Err(Error::TargetNotFound {
            path: target.to_path_buf(),
        });
    }
    let path = BackupManager::new(target).restore_snapshot(id, &TrackedDir::ALL)?;
    info!("Rollback completed from {}", path.display());
    Ok(path)
}
