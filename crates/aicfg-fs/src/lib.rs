//! Filesystem layer for ai-config
//!
//! Provides path normalization, content fingerprinting of configuration trees,
//! whole-tree copy/remove helpers and safe I/O for small metadata files.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod tree;

pub use checksum::{CHUNK_SIZE, hash_file, hash_reader};
pub use config::ConfigStore;
pub use constants::{BACKUP_ROOT_NAME, TrackedDir};
pub use error::{Error, Result};
pub use path::{NormalizedPath, normalize_relative_dir};
pub use tree::{Fingerprint, copy_tree, fingerprint_tree, list_files, remove_tree};
