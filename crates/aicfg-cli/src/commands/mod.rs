//! Command implementations for aicfg-cli

pub mod backups;
pub mod push;
pub mod rollback;
pub mod sync;

use std::path::Path;

use aicfg_core::{Settings, SettingsLayer, SettingsResolver};

use crate::cli::RemoteArgs;
use crate::error::Result;

pub use backups::run_backups;
pub use push::run_push;
pub use rollback::run_rollback;
pub use sync::run_sync;

/// Resolve settings for `target` with command-line flags as the last layer.
pub fn resolve_settings(
    target: &Path,
    remote: &RemoteArgs,
    commit_message: Option<&str>,
) -> Result<Settings> {
    let flags = SettingsLayer {
        repo: remote.repo.clone(),
        branch: remote.branch.clone(),
        remote_dir: remote.remote_dir.clone(),
        commit_message: commit_message.map(str::to_string),
    };
    let settings = SettingsResolver::new(target).resolve()?.with(&flags);
    tracing::debug!(?settings, "Resolved settings");
    Ok(settings)
}
