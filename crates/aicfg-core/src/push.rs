//! Publish local configuration to the remote repository

use std::path::{Path, PathBuf};

use aicfg_fs::{TrackedDir, copy_tree, remove_tree};
use aicfg_git::{CloneRequest, VcsProvider};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::workspace::{PUSH_PREFIX, Scratch, normalize_remote_dir, remote_root};
use crate::{Error, Result};

/// Options for a push run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOptions {
    /// Project directory (already resolved by the caller)
    pub target: PathBuf,
    pub repo_url: String,
    pub branch: String,
    /// Directory inside the repository receiving `.cursor`/`.claude`
    pub remote_dir: String,
    pub message: String,
}

impl PushOptions {
    /// Options for `target` taken from resolved settings.
    pub fn new(target: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            target: target.into(),
            repo_url: settings.repo_url.clone(),
            branch: settings.branch.clone(),
            remote_dir: settings.remote_dir.clone(),
            message: settings.commit_message.clone(),
        }
    }
}

/// How a push run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PushOutcome {
    /// Remote already matched; nothing was committed
    UpToDate,
    /// A commit was created and pushed
    Pushed { commit: String },
}

/// Report from a push run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushReport {
    #[serde(flatten)]
    pub outcome: PushOutcome,
    /// Local directories that were published
    pub directories: Vec<TrackedDir>,
    pub branch: String,
    pub remote_dir: String,
}

/// Copy the local tracked directories into a fresh clone and push if the
/// remote changes.
///
/// # Errors
///
/// - [`Error::TargetNotFound`] if the target does not exist
/// - [`Error::NothingToPush`] if no tracked directory exists locally
/// - [`Error::InvalidRemoteDir`] for an absolute or escaping remote dir
/// - [`Error::Git`] if clone, commit or push fails
pub fn run_push(vcs: &dyn VcsProvider, options: &PushOptions) -> Result<PushReport> {
    let target = &options.target;
    if !target.exists() {
        return Err(Error::TargetNotFound {
            path: target.clone(),
        });
    }
    let local_dirs: Vec<TrackedDir> = TrackedDir::ALL
        .into_iter()
        .filter(|dir| target.join(dir.as_str()).exists())
        .collect();
    if local_dirs.is_empty() {
        return Err(Error::NothingToPush {
            path: target.clone(),
        });
    }
    let remote_dir = normalize_remote_dir(&options.remote_dir)?;

    let scratch = Scratch::new(PUSH_PREFIX)?;
    let repo_path = scratch.repo_path();
    info!(
        "Cloning {} (branch {}) to prepare push into {}",
        options.repo_url, options.branch, remote_dir
    );
    let request = CloneRequest::new(options.repo_url.clone()).branch(options.branch.clone());
    vcs.clone_repository(&request, &repo_path)?;

    let is_root = remote_dir.is_current_dir();
    mirror_directories(target, &remote_root(&repo_path, &remote_dir), is_root)?;

    let report = |outcome| PushReport {
        outcome,
        directories: local_dirs.clone(),
        branch: options.branch.clone(),
        remote_dir: remote_dir.to_string(),
    };

    if !vcs.has_working_changes(&repo_path)? {
        info!("Remote repository already matches local configuration.");
        return Ok(report(PushOutcome::UpToDate));
    }

    let paths: Vec<String> = if is_root {
        TrackedDir::ALL.iter().map(|d| d.to_string()).collect()
    } else {
        vec![remote_dir.to_string()]
    };
    info!("Pushing changes to origin/{}", options.branch);
    match vcs.stage_commit_push(&repo_path, &paths, &options.message, &options.branch)? {
        Some(commit) => {
            info!("Push completed successfully.");
            Ok(report(PushOutcome::Pushed { commit }))
        }
        None => {
            info!("Remote repository already matches local configuration.");
            Ok(report(PushOutcome::UpToDate))
        }
    }
}

/// Replace the tracked directories under `remote_root` with the local ones.
///
/// Unless `remote_root` is the repository root, the whole of it is cleared
/// first so files the project no longer has disappear upstream. Each tracked
/// destination is deleted before it is copied.
pub fn mirror_directories(target: &Path, remote_root: &Path, is_root: bool) -> Result<()> {
    if !is_root {
        remove_tree(remote_root)?;
    }

    for dir in TrackedDir::ALL {
        let dest = remote_root.join(dir.as_str());
        remove_tree(&dest)?;

        let src = target.join(dir.as_str());
        if src.exists() {
            copy_tree(&src, &dest)?;
            debug!(directory = %dir, dest = %dest.display(), "Mirrored directory");
        }
    }
    Ok(())
}
