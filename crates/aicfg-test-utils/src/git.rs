//! Git fixtures built purely on `git2`.
//!
//! No `git` binary is required. Every repository is initialised with
//! `main` as its initial branch and a fixed committer identity so results do
//! not depend on the host's git configuration.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature};

/// Branch every fixture repository starts on.
pub const DEFAULT_BRANCH: &str = "main";

fn init_options(bare: bool) -> RepositoryInitOptions {
    let mut opts = RepositoryInitOptions::new();
    opts.bare(bare).initial_head(DEFAULT_BRANCH);
    opts
}

fn test_signature() -> Signature<'static> {
    Signature::now("Test User", "test@example.com").unwrap()
}

/// Initialise a working repository on `main` with a local committer
/// identity and no commits.
///
/// # Panics
/// Panics if the repository cannot be created.
pub fn real_git_repo(path: &Path) -> Repository {
    let repo = Repository::init_opts(path, &init_options(false)).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    });
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    repo
}

/// Write `files` (relative path, content) below `root`, creating parents.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write_files: failed to write {}: {e}", path.display()));
    }
}

/// Stage every change in the working tree (including deletions) and commit.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    index.add_all(["*"], IndexAddOption::DEFAULT, None).unwrap();
    index.update_all(["*"], None).unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = test_signature();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_all: commit failed: {e}"))
}

/// Create a bare remote at `<root>/remote.git` whose `main` branch holds a
/// `README.md` plus `files`.
///
/// The seeding working copy lives at `<root>/seed` and has the bare
/// repository configured as `origin`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn bare_remote(root: &Path, files: &[(&str, &str)]) -> PathBuf {
    let bare_path = root.join("remote.git");
    Repository::init_opts(&bare_path, &init_options(true)).unwrap_or_else(|e| {
        panic!(
            "bare_remote: failed to init bare repository at {}: {e}",
            bare_path.display()
        )
    });

    let seed_path = root.join("seed");
    let seed = real_git_repo(&seed_path);
    write_files(&seed_path, &[("README.md", "# remote configuration\n")]);
    write_files(&seed_path, files);
    commit_all(&seed, "Initial commit");

    seed.remote("origin", &bare_path.to_string_lossy()).unwrap();
    push_main(&seed);

    bare_path
}

/// Commit `writes` and `removals` on top of the remote's `main` branch and
/// push, simulating an upstream edit made elsewhere.
///
/// Requires a remote created by [`bare_remote`].
pub fn update_remote(bare: &Path, writes: &[(&str, &str)], removals: &[&str]) -> Oid {
    let seed_path = bare
        .parent()
        .map(|p| p.join("seed"))
        .unwrap_or_else(|| panic!("update_remote: {} has no parent", bare.display()));
    let seed = Repository::open(&seed_path).unwrap();

    // Pick up commits pushed by the code under test.
    let refspec = format!("+refs/heads/{DEFAULT_BRANCH}:refs/remotes/origin/{DEFAULT_BRANCH}");
    seed.find_remote("origin")
        .unwrap()
        .fetch(&[&refspec], None, None)
        .unwrap();
    let fetched = seed
        .find_reference(&format!("refs/remotes/origin/{DEFAULT_BRANCH}"))
        .and_then(|r| r.peel_to_commit())
        .unwrap();
    seed.reset(fetched.as_object(), git2::ResetType::Hard, None)
        .unwrap();

    write_files(&seed_path, writes);
    for relative in removals {
        let path = seed_path.join(relative);
        if path.is_dir() {
            fs::remove_dir_all(&path).unwrap();
        } else if path.exists() {
            fs::remove_file(&path).unwrap();
        }
    }
    let oid = commit_all(&seed, "Upstream edit");
    push_main(&seed);
    oid
}

fn push_main(repo: &Repository) {
    let refspec = format!("refs/heads/{DEFAULT_BRANCH}:refs/heads/{DEFAULT_BRANCH}");
    repo.find_remote("origin")
        .unwrap()
        .push(&[&refspec], None)
        .unwrap_or_else(|e| panic!("push to fixture remote failed: {e}"));
}

/// Read the content of `path` at the tip of `branch` in `repo_path` (bare or
/// not), or `None` if absent.
pub fn file_at_branch(repo_path: &Path, branch: &str, path: &str) -> Option<String> {
    let repo = Repository::open(repo_path).unwrap();
    let commit = repo
        .find_reference(&format!("refs/heads/{branch}"))
        .ok()?
        .peel_to_commit()
        .ok()?;
    let entry = commit.tree().ok()?.get_path(Path::new(path)).ok()?;
    let blob = repo.find_blob(entry.id()).ok()?;
    Some(String::from_utf8_lossy(blob.content()).into_owned())
}

/// Number of commits reachable from the tip of `branch`.
pub fn commit_count(repo_path: &Path, branch: &str) -> usize {
    let repo = Repository::open(repo_path).unwrap();
    let mut walk = repo.revwalk().unwrap();
    walk.push_ref(&format!("refs/heads/{branch}")).unwrap();
    walk.count()
}

/// Message of the commit at the tip of `branch`.
pub fn head_message(repo_path: &Path, branch: &str) -> String {
    let repo = Repository::open(repo_path).unwrap();
    let commit = repo
        .find_reference(&format!("refs/heads/{branch}"))
        .and_then(|r| r.peel_to_commit())
        .unwrap();
    commit.message().unwrap_or_default().to_string()
}
