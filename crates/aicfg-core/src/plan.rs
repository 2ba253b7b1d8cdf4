//! Per-directory reconciliation plans
//!
//! A [`DirectoryPlan`] records how one tracked directory in the project
//! differs from its counterpart in the source tree (a clone of the remote
//! repository). Building a plan never writes to disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use aicfg_fs::{Fingerprint, TrackedDir, fingerprint_tree, list_files};
use tracing::debug;

use crate::Result;

/// Where the replacement content for a tracked directory comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    /// The directory exists in the source tree at this path
    Present(PathBuf),
    /// The source tree has no such directory
    Absent,
}

impl TreeSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Present(path) => Some(path),
            Self::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Computed difference for one tracked directory.
///
/// `added`, `modified` and `removed` are sorted and pairwise disjoint. When
/// the source is [`TreeSource::Absent`], `removed` lists every file under
/// the destination and the other two lists are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPlan {
    pub directory: TrackedDir,
    pub source: TreeSource,
    pub destination: PathBuf,
    /// Whether the destination existed when the plan was built
    pub destination_exists: bool,
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
}

impl DirectoryPlan {
    /// Whether applying this plan would touch the filesystem.
    pub fn needs_change(&self) -> bool {
        match self.source {
            TreeSource::Absent => self.destination_exists,
            TreeSource::Present(_) => {
                !self.destination_exists
                    || !self.added.is_empty()
                    || !self.modified.is_empty()
                    || !self.removed.is_empty()
            }
        }
    }
}

/// Build one plan per directory in `dirs`, in the given order.
///
/// `source_root` is the directory holding the canonical copies,
/// `dest_root` the project being reconciled.
pub fn build_plan(
    source_root: &Path,
    dest_root: &Path,
    dirs: &[TrackedDir],
) -> Result<Vec<DirectoryPlan>> {
    let mut plans = Vec::with_capacity(dirs.len());

    for &directory in dirs {
        let source = source_root.join(directory.as_str());
        let destination = dest_root.join(directory.as_str());
        let destination_exists = destination.exists();

        let plan = if source.exists() {
            let source_files = fingerprint_tree(&source)?;
            let dest_files = fingerprint_tree(&destination)?;
            let (added, modified, removed) = diff_fingerprints(&source_files, &dest_files);
            DirectoryPlan {
                directory,
                source: TreeSource::Present(source),
                destination,
                destination_exists,
                added,
                modified,
                removed,
            }
        } else {
            DirectoryPlan {
                directory,
                source: TreeSource::Absent,
                removed: list_files(&destination)?,
                destination,
                destination_exists,
                added: Vec::new(),
                modified: Vec::new(),
            }
        };

        debug!(
            directory = %directory,
            source_present = plan.source.is_present(),
            destination_exists,
            added = plan.added.len(),
            modified = plan.modified.len(),
            removed = plan.removed.len(),
            "Built directory plan"
        );
        plans.push(plan);
    }

    Ok(plans)
}

/// Split two fingerprints into `(added, modified, removed)` relative paths.
///
/// `added` are keys only in `source`, `removed` keys only in `dest`, and
/// `modified` shared keys whose digests differ. Each list is sorted.
pub fn diff_fingerprints(
    source: &Fingerprint,
    dest: &Fingerprint,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let source_keys: BTreeSet<&String> = source.keys().collect();
    let dest_keys: BTreeSet<&String> = dest.keys().collect();

    let added = source_keys
        .difference(&dest_keys)
        .map(|k| (*k).clone())
        .collect();
    let removed = dest_keys
        .difference(&source_keys)
        .map(|k| (*k).clone())
        .collect();
    let modified = source_keys
        .intersection(&dest_keys)
        .filter(|k| source.get(**k) != dest.get(**k))
        .map(|k| (*k).clone())
        .collect();

    (added, modified, removed)
}
