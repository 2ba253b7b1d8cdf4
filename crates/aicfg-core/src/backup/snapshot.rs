//! Snapshot identifiers and metadata

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use aicfg_fs::TrackedDir;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// `chrono` format of snapshot identifiers (UTC).
pub const SNAPSHOT_ID_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Identifier of a backup snapshot: a UTC timestamp `YYYYMMDD-HHMMSS`.
///
/// Lexicographic order equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Identifier for the second containing `at`.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.format(SNAPSHOT_ID_FORMAT).to_string())
    }

    /// Parse and validate an identifier.
    ///
    /// Only the canonical zero-padded form is accepted.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidSnapshotId {
            value: value.to_string(),
        };
        let parsed =
            NaiveDateTime::parse_from_str(value, SNAPSHOT_ID_FORMAT).map_err(|_| invalid())?;
        if parsed.format(SNAPSHOT_ID_FORMAT).to_string() != value {
            return Err(invalid());
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The instant this identifier denotes.
    pub fn timestamp(&self) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(&self.0, SNAPSHOT_ID_FORMAT)
            .map(|naive| naive.and_utc())
            .unwrap_or_default()
    }

    /// The identifier one second later.
    pub fn next(&self) -> Self {
        Self::from_datetime(self.timestamp() + TimeDelta::seconds(1))
    }
}

impl FromStr for SnapshotId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SnapshotId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SnapshotId> for String {
    fn from(id: SnapshotId) -> Self {
        id.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    /// Path of the snapshot directory
    pub path: PathBuf,
    /// Tracked directories captured in the snapshot
    pub directories: Vec<TrackedDir>,
}

/// Contents of `snapshot.toml`.
///
/// Informational only: restore decides by which directories exist inside
/// the snapshot, not by this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub id: SnapshotId,
    pub created: DateTime<Utc>,
    pub directories: Vec<String>,
    /// Number of files copied across all directories
    pub files: usize,
}
