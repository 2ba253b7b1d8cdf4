//! Recursive directory operations: fingerprint, list, copy and remove.
//!
//! Symlinks are followed as long as their canonical target stays inside the
//! root being walked. A link to a file counts as a file with the target's
//! content and a link to a directory is traversed. Links that leave the root
//! are skipped with a warning, dangling links with a debug log.
//! Relative paths always use `/` as separator regardless of platform.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::checksum::hash_file;
use crate::{Error, Result};

/// Mapping from a file's path relative to the tree root to its content digest.
///
/// Keys are kept in lexicographic order.
pub type Fingerprint = BTreeMap<String, String>;

/// Compute the fingerprint of every regular file under `root`.
///
/// A missing `root` yields an empty fingerprint, the same as an empty
/// directory.
pub fn fingerprint_tree(root: &Path) -> Result<Fingerprint> {
    let mut fingerprint = Fingerprint::new();
    if !root.is_dir() {
        return Ok(fingerprint);
    }

    for entry in walk(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let digest = hash_file(entry.path())?;
        fingerprint.insert(relative_key(root, entry.path()), digest);
    }

    debug!(root = %root.display(), files = fingerprint.len(), "Fingerprinted tree");
    Ok(fingerprint)
}

/// List the relative paths of every regular file under `root`, sorted.
///
/// Unlike [`fingerprint_tree`] no file content is read.
pub fn list_files(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in walk(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(relative_key(root, entry.path()));
        }
    }
    files.sort();
    Ok(files)
}

/// Recursively copy the tree at `src` to `dst`.
///
/// `dst` and any missing parents are created. Empty directories are
/// preserved and symlinks are materialised as regular files; links that
/// resolve outside `src` are skipped.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    let mut copied = 0usize;
    for entry in walk(src) {
        let entry = entry?;
        let target = dst.join(relative_path(src, entry.path()));

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| Error::io(entry.path(), e))?;
            copied += 1;
        }
    }

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        files = copied,
        "Copied tree"
    );
    Ok(())
}

/// Recursively remove `path`. A path that does not exist is not an error.
pub fn remove_tree(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io(path, e)),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))?;
    } else {
        fs::remove_file(path).map_err(|e| Error::io(path, e))?;
    }

    debug!(path = %path.display(), "Removed tree");
    Ok(())
}

/// Walk everything below `root` (excluding `root` itself), following links
/// that stay inside `root` and skipping dangling ones.
fn walk(root: &Path) -> impl Iterator<Item = Result<DirEntry>> + '_ {
    let boundary = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| stays_within(&boundary, entry))
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(Ok(entry)),
            Err(err) if is_dangling_link(&err) => {
                debug!(path = ?err.path(), "Skipping dangling symlink");
                None
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                Some(Err(Error::io(path, source)))
            }
        })
}

/// Whether `entry` may be followed: plain entries always, links only when
/// their canonical target lies under `boundary`.
fn stays_within(boundary: &Path, entry: &DirEntry) -> bool {
    if !entry.path_is_symlink() {
        return true;
    }
    match fs::canonicalize(entry.path()) {
        Ok(resolved) if resolved.starts_with(boundary) => true,
        Ok(resolved) => {
            warn!(
                path = %entry.path().display(),
                target = %resolved.display(),
                "Skipping symlink that points outside the tree"
            );
            false
        }
        Err(_) => false,
    }
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.path().is_some_and(|path| {
        fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
            && fs::metadata(path).is_err()
    })
}

fn relative_path(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn relative_key(root: &Path, path: &Path) -> String {
    relative_path(root, path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
