//! Shared test utilities for the ai-config workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git fixtures (working repos, seeded bare remotes) built on `git2`
//! - [`tree`]: [`ConfigTree`] builder and the [`TestProject`] temp directory

pub mod git;
pub mod tree;

pub use tree::{ConfigTree, TestProject};
