//! Settings values and the per-source layer they are merged from

use serde::{Deserialize, Serialize};

/// Canonical configuration repository.
pub const DEFAULT_REPO_URL: &str = "https://github.com/xkcyy/ai-coder-extends.git";
/// Branch synced from and pushed to.
pub const DEFAULT_BRANCH: &str = "main";
/// Directory inside the repository holding the tracked directories.
pub const DEFAULT_REMOTE_DIR: &str = "remote-config/ai";
/// Commit message used by push.
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: sync ai IDE config";

/// One configuration source. Unset keys leave earlier layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsLayer {
    /// Repository URL (or local path)
    #[serde(alias = "repo-url")]
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub remote_dir: Option<String>,
    pub commit_message: Option<String>,
}

/// Effective settings after merging every layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub repo_url: String,
    pub branch: String,
    pub remote_dir: String,
    pub commit_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            remote_dir: DEFAULT_REMOTE_DIR.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

impl Settings {
    /// Override every key `layer` sets.
    pub fn apply(&mut self, layer: &SettingsLayer) {
        if let Some(repo) = &layer.repo {
            self.repo_url = repo.clone();
        }
        if let Some(branch) = &layer.branch {
            self.branch = branch.clone();
        }
        if let Some(remote_dir) = &layer.remote_dir {
            self.remote_dir = remote_dir.clone();
        }
        if let Some(message) = &layer.commit_message {
            self.commit_message = message.clone();
        }
    }

    /// Builder form of [`apply`](Self::apply).
    pub fn with(mut self, layer: &SettingsLayer) -> Self {
        self.apply(layer);
        self
    }
}
