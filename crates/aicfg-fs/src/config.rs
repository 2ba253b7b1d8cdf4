//! Loading and saving of small TOML settings/metadata files

use crate::{Error, NormalizedPath, Result, io};
use serde::{Serialize, de::DeserializeOwned};

/// Store for settings and snapshot metadata.
///
/// Only `.toml` files are accepted; any other extension is
/// [`Error::UnsupportedFormat`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    /// Create a new ConfigStore.
    pub fn new() -> Self {
        Self
    }

    /// Load a value from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        check_format(path)?;
        let content = io::read_text(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        })
    }

    /// Save a value to a file using an atomic write.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        check_format(path)?;
        let content = toml::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        })?;
        io::write_text(path, &content)
    }
}

fn check_format(path: &NormalizedPath) -> Result<()> {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(()),
        other => Err(Error::UnsupportedFormat {
            extension: other.unwrap_or_default().to_string(),
        }),
    }
}
