//! The uncommitted-changes guard against a project that is itself a git repository

use aicfg_core::{Error, ErrorKind, Settings, SyncOptions, SyncOutcome, run_sync};
use aicfg_git::GitProvider;
use aicfg_test_utils::git::{bare_remote, commit_all, real_git_repo, write_files};
use tempfile::TempDir;

struct Fixture {
    _remote_root: TempDir,
    project: TempDir,
    options: SyncOptions,
}

fn fixture() -> Fixture {
    let remote_root = TempDir::new().unwrap();
    let remote = bare_remote(
        remote_root.path(),
        &[("remote-config/ai/.cursor/rules.md", "shared")],
    );

    let project = TempDir::new().unwrap();
    let repo = real_git_repo(project.path());
    write_files(
        project.path(),
        &[(".cursor/rules.md", "local"), ("src/main.rs", "fn main() {}")],
    );
    commit_all(&repo, "initial");

    let settings = Settings {
        repo_url: remote.display().to_string(),
        ..Settings::default()
    };
    let options = SyncOptions::new(project.path(), &settings);
    Fixture {
        _remote_root: remote_root,
        project,
        options,
    }
}

#[test]
fn clean_project_syncs() {
    let fx = fixture();
    let report = run_sync(&GitProvider::new(), &fx.options).unwrap();

    assert!(report.changed());
    let rules = std::fs::read_to_string(fx.project.path().join(".cursor/rules.md")).unwrap();
    assert_eq!(rules, "shared");
}

#[test]
fn edited_tracked_file_blocks_sync() {
    let fx = fixture();
    write_files(fx.project.path(), &[(".cursor/rules.md", "edited")]);

    let err = run_sync(&GitProvider::new(), &fx.options).unwrap_err();

    assert!(matches!(err, Error::UncommittedChanges { .. }));
    assert_eq!(err.kind(), ErrorKind::PreconditionBlocked);
    let rules = std::fs::read_to_string(fx.project.path().join(".cursor/rules.md")).unwrap();
    assert_eq!(rules, "edited");
}

#[test]
fn untracked_claude_file_blocks_sync() {
    let fx = fixture();
    write_files(fx.project.path(), &[(".claude/settings.json", "{}")]);

    let err = run_sync(&GitProvider::new(), &fx.options).unwrap_err();
    assert!(matches!(err, Error::UncommittedChanges { .. }));
}

#[test]
fn edits_outside_tracked_dirs_do_not_block() {
    let fx = fixture();
    write_files(fx.project.path(), &[("src/main.rs", "fn main() { todo!() }")]);

    assert!(run_sync(&GitProvider::new(), &fx.options).is_ok());
}

#[test]
fn force_overrides_guard_and_backs_up() {
    let fx = fixture();
    write_files(fx.project.path(), &[(".cursor/rules.md", "edited")]);
    let mut options = fx.options.clone();
    options.force = true;

    let report = run_sync(&GitProvider::new(), &options).unwrap();

    let SyncOutcome::Applied { backup, .. } = report.outcome else {
        panic!("expected changes to be applied");
    };
    let backup = backup.expect("edited directory should be backed up");
    let saved = std::fs::read_to_string(backup.path.join(".cursor/rules.md")).unwrap();
    assert_eq!(saved, "edited");
}
