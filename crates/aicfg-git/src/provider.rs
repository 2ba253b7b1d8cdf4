//! Version-control contract used by the sync and push orchestrators

use std::path::Path;

use aicfg_fs::TrackedDir;

use crate::Result;

/// Parameters for materialising a working tree of the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    /// Repository URL or local path
    pub url: String,
    /// Branch to check out after cloning
    pub branch: Option<String>,
    /// Branch, tag or commit to check out instead of the branch tip
    pub git_ref: Option<String>,
    /// History depth; `None` clones the full history
    pub depth: Option<u32>,
}

impl CloneRequest {
    /// Full-depth clone of the default branch.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: None,
            git_ref: None,
            depth: None,
        }
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn git_ref(mut self, git_ref: Option<String>) -> Self {
        self.git_ref = git_ref;
        self
    }

    pub fn depth(mut self, depth: Option<u32>) -> Self {
        self.depth = depth;
        self
    }
}

/// Version-control operations the reconciliation core relies on.
///
/// Implementations handle the transport specifics; callers only see these
/// call shapes.
pub trait VcsProvider {
    /// Materialise a working tree of `request.url` at `destination`.
    ///
    /// A failed shallow clone, or a shallow clone missing `request.git_ref`,
    /// is retried exactly once with full depth.
    /// The final failure carries the underlying tool's message.
    fn clone_repository(&self, request: &CloneRequest, destination: &Path) -> Result<()>;

    /// Whether any tracked directory under `target` has uncommitted changes.
    ///
    /// A target that is not under version control reports `false`.
    fn has_uncommitted_changes(&self, target: &Path, dirs: &[TrackedDir]) -> bool;

    /// Whether the working tree at `repo` differs from its HEAD commit,
    /// untracked files included.
    fn has_working_changes(&self, repo: &Path) -> Result<bool>;

    /// Stage `paths` (additions and deletions), commit with `message` and
    /// push `branch` to `origin`.
    ///
    /// Returns the new commit id, or `None` when the staged tree matches
    /// HEAD and nothing was committed.
    fn stage_commit_push(
        &self,
        repo: &Path,
        paths: &[String],
        message: &str,
        branch: &str,
    ) -> Result<Option<String>>;
}
