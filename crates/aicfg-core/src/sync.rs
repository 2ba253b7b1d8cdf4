//! Pull the canonical configuration into a project
//!
//! Fetches the remote repository into a scratch clone, previews the
//! per-directory difference, refuses to overwrite uncommitted local edits
//! unless forced, backs up the current state and replaces every directory
//! that changed.

use std::path::PathBuf;

use aicfg_fs::TrackedDir;
use aicfg_git::{CloneRequest, VcsProvider};
use serde::Serialize;
use tracing::info;

use crate::apply::{ApplyReport, apply_plans};
use crate::backup::{BackupManager, Snapshot};
use crate::config::Settings;
use crate::plan::build_plan;
use crate::report::{PlanSummary, log_plans};
use crate::workspace::{SYNC_PREFIX, Scratch, normalize_remote_dir, remote_root};
use crate::{Error, Result};

/// Options for a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Project directory (already resolved by the caller)
    pub target: PathBuf,
    pub repo_url: String,
    pub branch: String,
    /// Branch, tag or commit to sync from instead of the branch tip
    pub git_ref: Option<String>,
    /// Directory inside the repository holding `.cursor`/`.claude`
    pub remote_dir: String,
    /// Report only, change nothing
    pub dry_run: bool,
    /// Skip the uncommitted-changes guard
    pub force: bool,
}

impl SyncOptions {
    /// Options for `target` taken from resolved settings.
    pub fn new(target: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            target: target.into(),
            repo_url: settings.repo_url.clone(),
            branch: settings.branch.clone(),
            git_ref: None,
            remote_dir: settings.remote_dir.clone(),
            dry_run: false,
            force: false,
        }
    }
}

/// How a sync run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Nothing differed; the project was not touched
    UpToDate,
    /// Differences were reported but not applied
    DryRun,
    /// Differences were applied after taking `backup`
    Applied {
        backup: Option<Snapshot>,
        applied: ApplyReport,
    },
}

/// Report from a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    #[serde(flatten)]
    pub outcome: SyncOutcome,
    pub plans: Vec<PlanSummary>,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Applied { .. })
    }
}

/// Reconcile `options.target` with the remote configuration.
///
/// The backup is always taken before any directory is replaced.
///
/// # Errors
///
/// - [`Error::TargetNotFound`] if the target does not exist
/// - [`Error::UncommittedChanges`] if tracked directories have local edits
///   and `force` is not set
/// - [`Error::InvalidRemoteDir`] for an absolute or escaping remote dir
/// - [`Error::RemoteDirNotFound`] if the clone lacks the remote dir
/// - [`Error::Git`] if the clone fails
pub fn run_sync(vcs: &dyn VcsProvider, options: &SyncOptions) -> Result<SyncReport> {
    let target = &options.target;
    if !target.exists() {
        return Err(Error::TargetNotFound {
            path: target.clone(),
        });
    }
    if !options.force && vcs.has_uncommitted_changes(target, &TrackedDir::ALL) {
        return Err(Error::UncommittedChanges {
            path: target.clone(),
        });
    }
    let remote_dir = normalize_remote_dir(&options.remote_dir)?;

    let scratch = Scratch::new(SYNC_PREFIX)?;
    let repo_path = scratch.repo_path();
    info!(
        "Fetching configuration from {} ({} -> {})",
        options.repo_url, options.branch, remote_dir
    );
    let request = CloneRequest::new(options.repo_url.clone())
        .branch(options.branch.clone())
        .git_ref(options.git_ref.clone())
        .depth(Some(1));
    vcs.clone_repository(&request, &repo_path)?;

    let source_root = remote_root(&repo_path, &remote_dir);
    if !source_root.is_dir() {
        return Err(Error::RemoteDirNotFound {
            remote_dir: remote_dir.to_string(),
            path: source_root,
        });
    }

    let plans = build_plan(&source_root, target, &TrackedDir::ALL)?;
    log_plans(&plans);
    let summaries: Vec<PlanSummary> = plans.iter().map(PlanSummary::from).collect();

    if !plans.iter().any(|plan| plan.needs_change()) {
        info!("No changes detected. You're already up to date.");
        return Ok(SyncReport {
            outcome: SyncOutcome::UpToDate,
            plans: summaries,
        });
    }
    if options.dry_run {
        info!("Dry run complete. No files were changed.");
        return Ok(SyncReport {
            outcome: SyncOutcome::DryRun,
            plans: summaries,
        });
    }

    let backup = BackupManager::new(target.clone()).create_backup(&TrackedDir::ALL)?;
    let applied = apply_plans(&plans, false)?;
    info!("Synchronization completed successfully.");

    Ok(SyncReport {
        outcome: SyncOutcome::Applied { backup, applied },
        plans: summaries,
    })
}
