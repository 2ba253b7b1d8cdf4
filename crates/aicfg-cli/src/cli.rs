//! CLI argument parsing using clap derive

use std::path::PathBuf;

use aicfg_core::SnapshotId;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// ai-config - Keep .cursor and .claude in sync with a shared repository
#[derive(Parser, Debug)]
#[command(name = "ai-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory to operate on
    #[arg(long, global = true, default_value = ".")]
    pub target: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by commands that talk to the configuration repository
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteArgs {
    /// Repository URL or local path
    #[arg(long, env = "AI_CONFIG_REPO")]
    pub repo: Option<String>,

    /// Branch to use
    #[arg(long, env = "AI_CONFIG_BRANCH")]
    pub branch: Option<String>,

    /// Directory inside the repository holding .cursor/.claude
    #[arg(long)]
    pub remote_dir: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Pull the shared configuration into the project
    ///
    /// Shows the difference first, refuses to overwrite uncommitted
    /// changes unless --force is given, and backs up the current
    /// directories before replacing them.
    ///
    /// Examples:
    ///   ai-config sync --dry-run
    ///   ai-config pull --ref v1.2.0
    #[command(alias = "pull")]
    Sync {
        #[command(flatten)]
        remote: RemoteArgs,

        /// Branch, tag or commit to sync from instead of the branch tip
        #[arg(long = "ref")]
        git_ref: Option<String>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Overwrite even if .cursor/.claude have uncommitted changes
        #[arg(long)]
        force: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Publish the local .cursor/.claude to the shared repository
    Push {
        #[command(flatten)]
        remote: RemoteArgs,

        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Restore .cursor/.claude from a backup snapshot
    Rollback {
        /// Snapshot timestamp (YYYYMMDD-HHMMSS)
        timestamp: SnapshotId,
    },

    /// List backup snapshots, newest first
    Backups {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
