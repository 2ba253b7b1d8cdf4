//! Shared git2 helper functions
//!
//! These functions encapsulate the git2 call sequences behind
//! [`GitProvider`](crate::GitProvider): clone with shallow fallback, ref
//! checkout, scoped status checks, staging and pushing.

use std::fs;
use std::path::Path;

use aicfg_fs::{TrackedDir, remove_tree};
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{
    Cred, CredentialType, FetchOptions, IndexAddOption, PushOptions, RemoteCallbacks, Repository,
    Signature, StatusOptions,
};
use tracing::{debug, info, warn};

use crate::provider::CloneRequest;
use crate::{Error, Result};

/// Identity used for commits when git has no `user.name`/`user.email`.
pub const FALLBACK_SIGNATURE_NAME: &str = "ai-config";
pub const FALLBACK_SIGNATURE_EMAIL: &str = "ai-config@localhost";

/// Credential callback invocations allowed before giving up.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

/// Clone `request.url` into `destination`.
///
/// A shallow clone that fails is retried once at full depth after the
/// partial destination is removed. When `request.git_ref` names something
/// other than the requested branch it is checked out (detached) afterwards;
/// a ref missing from a shallow history triggers the same full-depth retry.
pub fn clone_repository(request: &CloneRequest, destination: &Path) -> Result<Repository> {
    info!(url = %request.url, dest = %destination.display(), "Cloning repository");

    let (repo, shallow) = match try_clone(request, destination, request.depth) {
        Ok(repo) => (repo, request.depth.is_some()),
        Err(err) if request.depth.is_some() => {
            warn!(
                url = %request.url,
                error = %err.message(),
                "Shallow clone failed, retrying with full history"
            );
            remove_tree(destination)?;
            (full_clone(request, destination)?, false)
        }
        Err(err) => {
            return Err(Error::CloneFailed {
                url: request.url.clone(),
                message: err.message().to_string(),
            });
        }
    };

    let Some(git_ref) = request.git_ref.as_deref() else {
        return Ok(repo);
    };
    if request.branch.as_deref() == Some(git_ref) {
        return Ok(repo);
    }

    match checkout_ref(&repo, git_ref) {
        Err(Error::RefNotFound { .. }) if shallow => {
            warn!(git_ref, "Reference not in shallow history, retrying with full history");
            drop(repo);
            remove_tree(destination)?;
            let repo = full_clone(request, destination)?;
            checkout_ref(&repo, git_ref)?;
            Ok(repo)
        }
        result => result.map(|()| repo),
    }
}

fn full_clone(request: &CloneRequest, destination: &Path) -> Result<Repository> {
    try_clone(request, destination, None).map_err(|e| Error::CloneFailed {
        url: request.url.clone(),
        message: e.message().to_string(),
    })
}

fn try_clone(
    request: &CloneRequest,
    destination: &Path,
    depth: Option<u32>,
) -> std::result::Result<Repository, git2::Error> {
    let mut fetch = FetchOptions::new();
    fetch.remote_callbacks(remote_callbacks());
    if let Some(depth) = depth {
        fetch.depth(i32::try_from(depth).unwrap_or(i32::MAX));
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch);
    if let Some(branch) = request.branch.as_deref() {
        builder.branch(branch);
    }
    builder.clone(&request.url, destination)
}

/// Check out `git_ref` (branch, tag or commit) with a detached HEAD.
///
/// Names not found locally are also tried as `origin/<name>` so remote
/// branches resolve after a clone.
pub fn checkout_ref(repo: &Repository, git_ref: &str) -> Result<()> {
    let object = repo
        .revparse_single(git_ref)
        .or_else(|_| repo.revparse_single(&format!("origin/{git_ref}")))
        .map_err(|_| Error::RefNotFound {
            name: git_ref.to_string(),
        })?;
    let commit = object.peel_to_commit().map_err(|_| Error::RefNotFound {
        name: git_ref.to_string(),
    })?;

    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
    repo.set_head_detached(commit.id())?;

    debug!(git_ref, commit = %commit.id(), "Checked out reference");
    Ok(())
}

/// Whether any of `dirs` under `target` has uncommitted changes in the
/// enclosing working tree.
///
/// Untracked files count as changes, ignored files do not. A target outside
/// any repository, or inside a bare one, reports `false`.
pub fn has_uncommitted_changes(target: &Path, dirs: &[TrackedDir]) -> bool {
    let repo = match Repository::discover(target) {
        Ok(repo) => repo,
        Err(_) => {
            debug!(target = %target.display(), "Target is not inside a git repository");
            return false;
        }
    };
    let Some(workdir) = repo.workdir().and_then(|w| fs::canonicalize(w).ok()) else {
        return false;
    };
    let Ok(target) = fs::canonicalize(target) else {
        return false;
    };

    let prefixes: Vec<String> = dirs
        .iter()
        .filter_map(|dir| {
            let relative = target.join(dir.as_str());
            let relative = relative.strip_prefix(&workdir).ok()?;
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            Some(format!("{key}/"))
        })
        .collect();
    if prefixes.is_empty() {
        return false;
    }

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);

    let statuses = match repo.statuses(Some(&mut opts)) {
        Ok(statuses) => statuses,
        Err(e) => {
            warn!(error = %e, "Could not read repository status");
            return false;
        }
    };

    let dirty = statuses.iter().any(|entry| {
        entry
            .path()
            .is_some_and(|path| prefixes.iter().any(|prefix| path.starts_with(prefix)))
    });
    debug!(target = %target.display(), dirty, "Checked tracked directories for local edits");
    dirty
}

/// Whether the working tree at `repo_path` differs from HEAD, untracked
/// files included.
pub fn has_working_changes(repo_path: &Path) -> Result<bool> {
    let repo = Repository::open(repo_path)?;
    if repo.is_bare() {
        return Err(Error::NotAWorkTree {
            path: repo_path.to_path_buf(),
        });
    }

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);
    let statuses = repo.statuses(Some(&mut opts))?;
    Ok(!statuses.is_empty())
}

/// Stage additions, modifications and deletions under `paths` and commit.
///
/// Returns the commit id, or `None` when the resulting tree is identical to
/// HEAD's tree.
pub fn stage_and_commit(
    repo: &Repository,
    paths: &[String],
    message: &str,
) -> Result<Option<String>> {
    let mut index = repo.index()?;
    index.add_all(paths.iter().map(String::as_str), IndexAddOption::DEFAULT, None)?;
    index.update_all(paths.iter().map(String::as_str), None)?;
    index.write()?;

    let tree_id = index.write_tree()?;
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    if let Some(parent) = &parent
        && parent.tree_id() == tree_id
    {
        debug!("Staged tree matches HEAD, nothing to commit");
        return Ok(None);
    }

    let tree = repo.find_tree(tree_id)?;
    let signature = signature(repo)?;
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

    info!(commit = %oid, "Created commit");
    Ok(Some(oid.to_string()))
}

/// Push a local branch to a remote (defaults to "origin").
///
/// Rejections reported by the remote are surfaced as [`Error::PushFailed`].
pub fn push(repo: &Repository, remote: Option<&str>, branch: &str) -> Result<()> {
    let remote_name = remote.unwrap_or("origin");
    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|_| Error::RemoteNotFound {
            name: remote_name.to_string(),
        })?;

    let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);

    let mut callbacks = remote_callbacks();
    callbacks.push_update_reference(|refname, status| match status {
        Some(reason) => Err(git2::Error::from_str(&format!(
            "remote rejected {refname}: {reason}"
        ))),
        None => Ok(()),
    });
    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    remote
        .push(&[&refspec], Some(&mut options))
        .map_err(|e| Error::PushFailed {
            message: e.message().to_string(),
        })?;

    info!(remote = remote_name, branch, "Pushed branch");
    Ok(())
}

/// Commit identity from git configuration, or the ai-config fallback.
pub fn signature(repo: &Repository) -> Result<Signature<'static>> {
    match repo.signature() {
        Ok(signature) => Ok(signature),
        Err(_) => Ok(Signature::now(
            FALLBACK_SIGNATURE_NAME,
            FALLBACK_SIGNATURE_EMAIL,
        )?),
    }
}

fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut attempts = 0u32;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }

        if allowed.contains(CredentialType::SSH_KEY)
            && let Some(user) = username_from_url
        {
            return Cred::ssh_key_from_agent(user);
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT)
            && let Ok(config) = git2::Config::open_default()
        {
            return Cred::credential_helper(&config, url, username_from_url);
        }
        if allowed.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }
        Err(git2::Error::from_str("no supported credential type"))
    });
    callbacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn uncommitted_outside_repository_is_false() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".cursor")).unwrap();
        fs::write(temp.path().join(".cursor/a.md"), "x").unwrap();

        assert!(!has_uncommitted_changes(temp.path(), &TrackedDir::ALL));
    }

    #[test]
    fn signature_prefers_repository_config() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let mut config = repo.config().unwrap();
        // Local config overrides whatever the host has globally.
        config.set_str("user.name", "Local Dev").unwrap();
        config.set_str("user.email", "dev@example.com").unwrap();

        let sig = signature(&repo).unwrap();
        assert_eq!(sig.name(), Some("Local Dev"));
    }

    #[test]
    fn checkout_unknown_ref_is_ref_not_found() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let err = checkout_ref(&repo, "v9.9.9").unwrap_err();
        assert!(matches!(err, Error::RefNotFound { ref name } if name == "v9.9.9"));
    }
}
