//! Sync command implementation
//!
//! Pulls the shared configuration into the project through aicfg-core.

use std::path::Path;

use colored::Colorize;

use aicfg_core::{SyncOptions, SyncOutcome, SyncReport};
use aicfg_git::GitProvider;

use crate::cli::RemoteArgs;
use crate::commands::resolve_settings;
use crate::error::Result;

/// Flags of the sync command beyond the repository location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncFlags {
    pub dry_run: bool,
    pub force: bool,
    pub json: bool,
}

/// Run the sync command
pub fn run_sync(
    target: &Path,
    remote: &RemoteArgs,
    git_ref: Option<String>,
    flags: SyncFlags,
) -> Result<()> {
    let settings = resolve_settings(target, remote, None)?;
    let mut options = SyncOptions::new(target, &settings);
    options.git_ref = git_ref;
    options.dry_run = flags.dry_run;
    options.force = flags.force;

    if !flags.json {
        let mode = if flags.dry_run { " (dry run)" } else { "" };
        println!(
            "{} Syncing {} from {}{}",
            "=>".blue().bold(),
            target.display(),
            settings.repo_url.cyan(),
            mode
        );
    }

    let report = aicfg_core::run_sync(&GitProvider::new(), &options)?;

    if flags.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SyncReport) {
    match &report.outcome {
        SyncOutcome::UpToDate => {
            println!("{} Already up to date.", "OK".green().bold());
        }
        SyncOutcome::DryRun => {
            for plan in report.plans.iter().filter(|p| p.needs_change) {
                println!("   {} {}", "~".yellow(), plan.description);
            }
            println!(
                "{} Dry run complete. No files were changed.",
                "DRY RUN".yellow().bold()
            );
        }
        SyncOutcome::Applied { backup, applied } => {
            if let Some(snapshot) = backup {
                println!(
                    "   Backup {} at {}",
                    snapshot.id.as_str().cyan(),
                    snapshot.path.display()
                );
            }
            for dir in &applied.replaced {
                println!("   {} {}", "+".green(), dir);
            }
            for dir in &applied.removed {
                println!("   {} {}", "-".red(), dir);
            }
            println!("{} Synchronization complete.", "OK".green().bold());
        }
    }
}
