//! `git2`-backed implementation of [`VcsProvider`]

use std::path::Path;

use aicfg_fs::TrackedDir;

use crate::Result;
use crate::helpers;
use crate::provider::{CloneRequest, VcsProvider};

/// Version-control provider talking to repositories through libgit2.
///
/// Authentication relies on ssh-agent, the configured git credential
/// helper, or default (e.g. Kerberos) credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitProvider;

impl GitProvider {
    pub fn new() -> Self {
        Self
    }
}

impl VcsProvider for GitProvider {
    fn clone_repository(&self, request: &CloneRequest, destination: &Path) -> Result<()> {
        helpers::clone_repository(request, destination).map(|_| ())
    }

    fn has_uncommitted_changes(&self, target: &Path, dirs: &[TrackedDir]) -> bool {
        helpers::has_uncommitted_changes(target, dirs)
    }

    fn has_working_changes(&self, repo: &Path) -> Result<bool> {
        helpers::has_working_changes(repo)
    }

    fn stage_commit_push(
        &self,
        repo: &Path,
        paths: &[String],
        message: &str,
        branch: &str,
    ) -> Result<Option<String>> {
        let repository = git2::Repository::open(repo)?;
        let Some(commit) = helpers::stage_and_commit(&repository, paths, message)? else {
            return Ok(None);
        };
        helpers::push(&repository, None, branch)?;
        Ok(Some(commit))
    }
}
