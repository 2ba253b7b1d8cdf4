//! Backups command implementation
//!
//! Lists snapshots under `.ai-config-backup`, newest first.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use aicfg_core::{BackupManager, Snapshot, SnapshotMetadata};

use crate::error::Result;

#[derive(Debug, Serialize)]
struct BackupEntry {
    #[serde(flatten)]
    snapshot: Snapshot,
    metadata: Option<SnapshotMetadata>,
}

/// Run the backups command
pub fn run_backups(target: &Path, json: bool) -> Result<()> {
    let manager = BackupManager::new(target);
    let mut entries = Vec::new();
    for snapshot in manager.list_snapshots()? {
        let metadata = manager.metadata(&snapshot.id)?;
        entries.push(BackupEntry { snapshot, metadata });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No backups found in {}", manager.backup_root().display());
        return Ok(());
    }

    println!("{} Backups in {}", "=>".blue().bold(), manager.backup_root().display());
    for entry in &entries {
        let dirs: Vec<&str> = entry
            .snapshot
            .directories
            .iter()
            .map(|d| d.as_str())
            .collect();
        let files = entry
            .metadata
            .as_ref()
            .map(|m| format!(" ({} files)", m.files))
            .unwrap_or_default();
        println!(
            "   {}  {}{}",
            entry.snapshot.id.as_str().cyan(),
            dirs.join(", "),
            files
        );
    }
    Ok(())
}
