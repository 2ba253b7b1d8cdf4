//! Apply directory plans to the project
//!
//! Changed directories are replaced wholesale; there is no per-file
//! patching and no automatic undo if a step fails midway. Recovery from an
//! interrupted apply goes through the backup taken beforehand.

use aicfg_fs::{TrackedDir, copy_tree, remove_tree};
use serde::Serialize;
use tracing::{debug, info};

use crate::Result;
use crate::plan::{DirectoryPlan, TreeSource};

/// What an apply pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Directories replaced with the source copy
    pub replaced: Vec<TrackedDir>,
    /// Directories deleted because the source no longer has them
    pub removed: Vec<TrackedDir>,
}

impl ApplyReport {
    pub fn is_empty(&self) -> bool {
        self.replaced.is_empty() && self.removed.is_empty()
    }
}

/// Execute `plans` in order.
///
/// With `dry_run` set, returns an empty report without touching the
/// filesystem. Plans that need no change are skipped.
pub fn apply_plans(plans: &[DirectoryPlan], dry_run: bool) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();
    if dry_run {
        return Ok(report);
    }

    for plan in plans {
        if !plan.needs_change() {
            debug!(directory = %plan.directory, "Skipping unchanged directory");
            continue;
        }

        match &plan.source {
            TreeSource::Absent => {
                remove_tree(&plan.destination)?;
                info!(directory = %plan.directory, "Removed directory absent from remote");
                report.removed.push(plan.directory);
            }
            TreeSource::Present(source) => {
                remove_tree(&plan.destination)?;
                copy_tree(source, &plan.destination)?;
                info!(directory = %plan.directory, "Replaced directory from remote");
                report.replaced.push(plan.directory);
            }
        }
    }

    Ok(report)
}
