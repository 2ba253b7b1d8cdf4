//! Git transport for ai-config
//!
//! Everything the reconciliation core needs from version control sits behind
//! [`VcsProvider`]: cloning the canonical configuration repository, guarding
//! against uncommitted local edits, and committing + pushing local
//! configuration back. [`GitProvider`] implements it on top of `git2`.

pub mod error;
pub mod git;
pub mod helpers;
pub mod provider;

pub use error::{Error, Result};
pub use git::GitProvider;
pub use provider::{CloneRequest, VcsProvider};
