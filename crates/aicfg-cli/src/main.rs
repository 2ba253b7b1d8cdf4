//! ai-config CLI
//!
//! Keeps a project's `.cursor` and `.claude` directories in sync with a
//! shared configuration repository.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use commands::sync::SyncFlags;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(&cli.target, cmd),
        None => {
            println!("{} AI IDE configuration sync", "ai-config".green().bold());
            println!();
            println!("Run {} for available commands.", "ai-config --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(target: &Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            remote,
            git_ref,
            dry_run,
            force,
            json,
        } => {
            let target = resolve_target(target)?;
            let flags = SyncFlags {
                dry_run,
                force,
                json,
            };
            commands::run_sync(&target, &remote, git_ref, flags)
        }
        Commands::Push { remote, message } => {
            let target = resolve_target(target)?;
            commands::run_push(&target, &remote, message.as_deref())
        }
        Commands::Rollback { timestamp } => {
            let target = resolve_target(target)?;
            commands::run_rollback(&target, &timestamp)
        }
        Commands::Backups { json } => {
            let target = resolve_target(target)?;
            commands::run_backups(&target, json)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Canonicalize the project directory, failing if it does not exist.
fn resolve_target(target: &Path) -> Result<PathBuf> {
    let resolved = dunce::canonicalize(target).map_err(|_| {
        CliError::from(aicfg_core::Error::TargetNotFound {
            path: target.to_path_buf(),
        })
    })?;
    if !resolved.is_dir() {
        return Err(CliError::user(format!(
            "Target {} is not a directory",
            resolved.display()
        )));
    }
    Ok(resolved)
}
