//! Backup snapshots of tracked directories
//!
//! Snapshots are stored at `<target>/.ai-config-backup/<YYYYMMDD-HHMMSS>/`
//! with:
//! - one subdirectory per tracked directory that existed at backup time
//! - snapshot.toml: informational metadata (creation time, directories, file count)
//!
//! Snapshots are never pruned automatically.

mod manager;
mod snapshot;

pub use manager::{BackupManager, METADATA_FILE};
pub use snapshot::{SNAPSHOT_ID_FORMAT, Snapshot, SnapshotId, SnapshotMetadata};
