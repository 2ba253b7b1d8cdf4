//! Rollback command implementation

use std::path::Path;

use colored::Colorize;

use aicfg_core::SnapshotId;

use crate::error::Result;

/// Run the rollback command
pub fn run_rollback(target: &Path, id: &SnapshotId) -> Result<()> {
    println!(
        "{} Restoring {} from backup {}",
        "=>".blue().bold(),
        target.display(),
        id.as_str().cyan()
    );

    let path = aicfg_core::run_rollback(target, id)?;

    println!(
        "{} Rollback completed from {}",
        "OK".green().bold(),
        path.display()
    );
    Ok(())
}
