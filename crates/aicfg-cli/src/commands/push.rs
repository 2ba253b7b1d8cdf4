//! Push command implementation

use std::path::Path;

use colored::Colorize;

use aicfg_core::{PushOptions, PushOutcome};
use aicfg_git::GitProvider;

use crate::cli::RemoteArgs;
use crate::commands::resolve_settings;
use crate::error::Result;

/// Run the push command
pub fn run_push(target: &Path, remote: &RemoteArgs, message: Option<&str>) -> Result<()> {
    let settings = resolve_settings(target, remote, message)?;
    let options = PushOptions::new(target, &settings);

    println!(
        "{} Pushing {} to {} ({}:{})",
        "=>".blue().bold(),
        target.display(),
        settings.repo_url.cyan(),
        settings.branch,
        settings.remote_dir
    );

    let report = aicfg_core::run_push(&GitProvider::new(), &options)?;

    match report.outcome {
        PushOutcome::UpToDate => {
            println!(
                "{} Remote already matches local configuration.",
                "OK".green().bold()
            );
        }
        PushOutcome::Pushed { commit } => {
            let dirs: Vec<&str> = report.directories.iter().map(|d| d.as_str()).collect();
            println!(
                "{} Pushed {} as {}",
                "OK".green().bold(),
                dirs.join(", "),
                commit.get(..7).unwrap_or(&commit).cyan()
            );
        }
    }
    Ok(())
}
