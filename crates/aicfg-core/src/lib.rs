//! Reconciliation engine for ai-config
//!
//! This crate sits between the Layer 0 crates and the CLI and implements:
//!
//! - **Plans**: per-directory difference between the remote copy and the project
//! - **Reporting**: one-line descriptions and serialisable summaries of plans
//! - **Apply**: wholesale replacement of changed directories
//! - **Backups**: timestamped snapshots taken before every destructive sync
//! - **Settings**: layered defaults, global and project config
//! - **Orchestrators**: `run_sync`, `run_push` and `run_rollback`
//!
//! # Architecture
//!
//! ```text
//!          aicfg-cli
//!              |
//!          aicfg-core
//!              |
//!      +-------+-------+
//!      |               |
//!   aicfg-fs       aicfg-git
//! ```
//!
//! Version control is only reached through [`aicfg_git::VcsProvider`], so
//! the orchestrators can be driven by any implementation.

pub mod apply;
pub mod backup;
pub mod config;
pub mod error;
pub mod plan;
pub mod push;
pub mod report;
pub mod rollback;
pub mod sync;
pub mod workspace;

pub use apply::{ApplyReport, apply_plans};
pub use backup::{BackupManager, Snapshot, SnapshotId, SnapshotMetadata};
pub use config::{Settings, SettingsLayer, SettingsResolver};
pub use error::{Error, ErrorKind, Result};
pub use plan::{DirectoryPlan, TreeSource, build_plan, diff_fingerprints};
pub use push::{PushOptions, PushOutcome, PushReport, run_push};
pub use report::{PlanStatus, PlanSummary, describe, log_plans};
pub use rollback::run_rollback;
pub use sync::{SyncOptions, SyncOutcome, SyncReport, run_sync};
