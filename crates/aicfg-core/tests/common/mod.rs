//! Shared helpers for aicfg-core integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use aicfg_fs::{TrackedDir, copy_tree};
use aicfg_git::{CloneRequest, VcsProvider};

/// In-memory stand-in for git: "cloning" copies a prepared directory.
pub struct FakeProvider {
    source: PathBuf,
    dirty: bool,
    clones: RefCell<Vec<(CloneRequest, PathBuf)>>,
}

impl FakeProvider {
    pub fn serving(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            dirty: false,
            clones: RefCell::new(Vec::new()),
        }
    }

    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn clones(&self) -> Vec<(CloneRequest, PathBuf)> {
        self.clones.borrow().clone()
    }
}

impl VcsProvider for FakeProvider {
    fn clone_repository(
        &self,
        request: &CloneRequest,
        destination: &Path,
    ) -> aicfg_git::Result<()> {
        copy_tree(&self.source, destination)?;
        self.clones
            .borrow_mut()
            .push((request.clone(), destination.to_path_buf()));
        Ok(())
    }

    fn has_uncommitted_changes(&self, _target: &Path, _dirs: &[TrackedDir]) -> bool {
        self.dirty
    }

    fn has_working_changes(&self, _repo: &Path) -> aicfg_git::Result<bool> {
        Ok(true)
    }

    fn stage_commit_push(
        &self,
        _repo: &Path,
        _paths: &[String],
        _message: &str,
        _branch: &str,
    ) -> aicfg_git::Result<Option<String>> {
        Ok(Some("0000000".into()))
    }
}
