//! Settings resolution
//!
//! Settings are merged from these sources (later sources override earlier,
//! key by key):
//!
//! 1. **Built-in defaults** - see [`Settings::default`]
//! 2. **Global config** - `<config_dir>/ai-config/config.toml`
//! 3. **Project config** - `<target>/.ai-config.toml`
//! 4. **Command-line overrides** - applied by the caller via [`Settings::apply`]
//!
//! # Example
//!
//! ```ignore
//! use aicfg_core::config::SettingsResolver;
//!
//! let settings = SettingsResolver::new("/path/to/project").resolve()?;
//! println!("Syncing from {}", settings.repo_url);
//! ```

mod resolver;
mod settings;

pub use resolver::{GLOBAL_CONFIG_DIR_NAME, PROJECT_CONFIG_FILE, SettingsResolver};
pub use settings::{
    DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE, DEFAULT_REMOTE_DIR, DEFAULT_REPO_URL, Settings,
    SettingsLayer,
};
