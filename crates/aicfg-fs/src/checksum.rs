//! SHA-256 content identity
//!
//! Digests are lowercase hex strings of fixed length (64 characters). Files
//! are hashed by streaming fixed-size chunks so large files never have to be
//! held in memory.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::{Error, Result};

/// Read size used when streaming a file into the hasher (1 MiB).
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Compute the SHA-256 digest of everything `reader` yields, reading
/// `chunk_size` bytes at a time.
///
/// The digest does not depend on `chunk_size`.
pub fn hash_reader<R: Read>(mut reader: R, chunk_size: usize) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the SHA-256 digest of a file's contents.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the file if it cannot be opened or a read
/// fails mid-stream.
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    hash_reader(file, CHUNK_SIZE).map_err(|e| Error::io(path, e))
}
