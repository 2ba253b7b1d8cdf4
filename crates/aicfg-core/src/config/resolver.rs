//! Layered settings resolution
//!
//! The `SettingsResolver` loads and merges settings from the global and
//! project config files on top of the built-in defaults.

use std::path::{Path, PathBuf};

use aicfg_fs::{ConfigStore, NormalizedPath};

use super::settings::{Settings, SettingsLayer};
use crate::Result;

/// Subdirectory of the platform config dir holding the global config.
pub const GLOBAL_CONFIG_DIR_NAME: &str = "ai-config";
/// Per-project config file, relative to the target.
pub const PROJECT_CONFIG_FILE: &str = ".ai-config.toml";

/// Resolves settings by merging multiple sources
///
/// 1. Built-in defaults
/// 2. Global config (`<config_dir>/ai-config/config.toml`)
/// 3. Project config (`<target>/.ai-config.toml`)
///
/// Missing files are skipped. A file that fails to parse is an error.
pub struct SettingsResolver {
    /// Project directory
    target: PathBuf,

    /// Override for the global config directory (used for testing).
    /// When `None`, the platform-appropriate directory is used via `dirs::config_dir()`.
    global_config_dir_override: Option<PathBuf>,
}

impl SettingsResolver {
    /// Create a resolver for the given project directory
    ///
    /// Uses the platform-appropriate global config directory:
    /// - Linux: `~/.config/ai-config/`
    /// - macOS: `~/Library/Application Support/ai-config/`
    /// - Windows: `%APPDATA%\ai-config\`
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            global_config_dir_override: None,
        }
    }

    /// Create a resolver with a custom global config directory.
    pub fn with_global_config_dir(target: impl Into<PathBuf>, global_config_dir: PathBuf) -> Self {
        Self {
            target: target.into(),
            global_config_dir_override: Some(global_config_dir),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join(GLOBAL_CONFIG_DIR_NAME))
    }

    /// Path of the global config file, if a config directory is known.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Path of the project config file.
    pub fn project_config_path(&self) -> PathBuf {
        self.target.join(PROJECT_CONFIG_FILE)
    }

    /// Resolve the effective settings.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        // Layer 2 - Global config
        if let Some(global_config_path) = self.global_config_path() {
            if let Some(layer) = load_layer(&global_config_path)? {
                tracing::debug!(?global_config_path, "Loaded global config");
                settings.apply(&layer);
            } else {
                tracing::debug!(?global_config_path, "No global config found, skipping");
            }
        }

        // Layer 3 - Project config
        let project_config_path = self.project_config_path();
        if let Some(layer) = load_layer(&project_config_path)? {
            tracing::debug!(?project_config_path, "Loaded project config");
            settings.apply(&layer);
        }

        Ok(settings)
    }
}

fn load_layer(path: &Path) -> Result<Option<SettingsLayer>> {
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(ConfigStore::new().load(&NormalizedPath::new(path))?))
}
