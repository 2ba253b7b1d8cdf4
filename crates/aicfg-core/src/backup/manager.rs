//! Backup manager implementation
//!
//! Handles creating, listing, and restoring snapshots of tracked directories.

use std::fs;
use std::path::{Path, PathBuf};

use aicfg_fs::{
    BACKUP_ROOT_NAME, ConfigStore, NormalizedPath, TrackedDir, copy_tree, list_files, remove_tree,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::snapshot::{Snapshot, SnapshotId, SnapshotMetadata};
use crate::{Error, Result};

/// Name of the metadata file written inside each snapshot.
pub const METADATA_FILE: &str = "snapshot.toml";

/// Manages backup snapshots for one project
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// Project whose tracked directories are backed up
    target: PathBuf,
    /// Path to the snapshots directory (`<target>/.ai-config-backup`)
    backup_root: PathBuf,
}

impl BackupManager {
    /// Create a new BackupManager for the given project directory
    pub fn new(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        let backup_root = target.join(BACKUP_ROOT_NAME);
        Self {
            target,
            backup_root,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Directory a snapshot with `id` lives (or would live) in.
    pub fn snapshot_path(&self, id: &SnapshotId) -> PathBuf {
        self.backup_root.join(id.as_str())
    }

    /// Snapshot every existing directory in `dirs`, stamped with the current
    /// UTC time.
    ///
    /// Returns `None` (and creates nothing) when none of `dirs` exists.
    pub fn create_backup(&self, dirs: &[TrackedDir]) -> Result<Option<Snapshot>> {
        self.create_backup_at(Utc::now(), dirs)
    }

    /// Same as [`create_backup`](Self::create_backup) with an explicit clock.
    ///
    /// If a snapshot for `now` already exists the identifier is advanced one
    /// second at a time until it is free, so identifiers stay unique and
    /// increasing.
    pub fn create_backup_at(
        &self,
        now: DateTime<Utc>,
        dirs: &[TrackedDir],
    ) -> Result<Option<Snapshot>> {
        let present: Vec<TrackedDir> = dirs
            .iter()
            .copied()
            .filter(|dir| self.target.join(dir.as_str()).exists())
            .collect();
        if present.is_empty() {
            debug!(target = %self.target.display(), "No tracked directories to back up");
            return Ok(None);
        }

        let mut id = SnapshotId::from_datetime(now);
        while self.snapshot_path(&id).exists() {
            id = id.next();
        }
        let path = self.snapshot_path(&id);

        let mut files = 0usize;
        for dir in &present {
            let dest = path.join(dir.as_str());
            copy_tree(&self.target.join(dir.as_str()), &dest)?;
            files += list_files(&dest)?.len();
        }

        let metadata = SnapshotMetadata {
            created: id.timestamp(),
            id: id.clone(),
            directories: present.iter().map(|d| d.to_string()).collect(),
            files,
        };
        ConfigStore::new().save(&NormalizedPath::new(path.join(METADATA_FILE)), &metadata)?;

        info!("Created backup at {}", path.display());
        Ok(Some(Snapshot {
            id,
            path,
            directories: present,
        }))
    }

    /// Restore `dirs` from snapshot `id`.
    ///
    /// For every directory captured in the snapshot the live copy is deleted
    /// and replaced. Directories the snapshot does not contain are left
    /// untouched. Returns the snapshot path.
    ///
    /// # Errors
    ///
    /// [`Error::SnapshotNotFound`] naming the full snapshot path if it does
    /// not exist.
    pub fn restore_snapshot(&self, id: &SnapshotId, dirs: &[TrackedDir]) -> Result<PathBuf> {
        let path = self.snapshot_path(id);
        if !path.is_dir() {
            return Err(Error::SnapshotNotFound {
                id: id.to_string(),
                path,
            });
        }

        for dir in dirs {
            let src = path.join(dir.as_str());
            if !src.is_dir() {
                debug!(
                    directory = %dir,
                    snapshot = %id,
                    "Directory not in snapshot, leaving as is"
                );
                continue;
            }
            let dest = self.target.join(dir.as_str());
            remove_tree(&dest)?;
            copy_tree(&src, &dest)?;
            info!(directory = %dir, snapshot = %id, "Restored directory");
        }

        Ok(path)
    }

    /// All snapshots on disk, newest first.
    ///
    /// Entries whose name is not a snapshot identifier are ignored.
    pub fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        let entries = match fs::read_dir(&self.backup_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(aicfg_fs::Error::io(&self.backup_root, e).into()),
        };

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| aicfg_fs::Error::io(&self.backup_root, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Ok(id) = SnapshotId::parse(&name.to_string_lossy()) else {
                warn!(path = %path.display(), "Ignoring unrecognised entry in backup directory");
                continue;
            };
            let directories = TrackedDir::ALL
                .into_iter()
                .filter(|dir| path.join(dir.as_str()).is_dir())
                .collect();
            snapshots.push(Snapshot {
                id,
                path,
                directories,
            });
        }

        snapshots.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(snapshots)
    }

    /// Read a snapshot's metadata, if it has any.
    pub fn metadata(&self, id: &SnapshotId) -> Result<Option<SnapshotMetadata>> {
        let path = self.snapshot_path(id).join(METADATA_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(ConfigStore::new().load(&NormalizedPath::new(path))?))
    }
}
