//! End-to-end flow across two projects sharing one configuration remote
//!
//! push from A -> sync into B -> upstream edit -> sync B again (with backup)
//! -> rollback B to the state before the second sync.

use std::path::Path;

use aicfg_core::{
    BackupManager, PushOptions, PushOutcome, Settings, SyncOptions, SyncOutcome, run_push,
    run_rollback, run_sync,
};
use aicfg_fs::{TrackedDir, fingerprint_tree};
use aicfg_git::GitProvider;
use aicfg_test_utils::git::{bare_remote, commit_count, update_remote};
use aicfg_test_utils::{ConfigTree, TestProject};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn settings(remote: &Path) -> Settings {
    Settings {
        repo_url: remote.display().to_string(),
        ..Settings::default()
    }
}

#[test]
fn push_sync_update_rollback() {
    let remote_root = TempDir::new().unwrap();
    let remote = bare_remote(remote_root.path(), &[]);
    let git = GitProvider::new();

    // Project A publishes its configuration
    let author = TestProject::with_tree(
        &ConfigTree::new()
            .file(".cursor/rules/style.md", "tabs")
            .file(".claude/agents/reviewer.md", "be strict")
            .file(".claude/settings.json", "{}"),
    );
    let pushed = run_push(&git, &PushOptions::new(author.root(), &settings(&remote))).unwrap();
    assert!(matches!(pushed.outcome, PushOutcome::Pushed { .. }));
    assert_eq!(commit_count(&remote, "main"), 2);

    // Project B starts with stale local rules
    let consumer =
        TestProject::with_tree(&ConfigTree::new().file(".cursor/rules/style.md", "spaces"));
    let options = SyncOptions::new(consumer.root(), &settings(&remote));
    let first = run_sync(&git, &options).unwrap();
    assert!(first.changed());
    for dir in TrackedDir::ALL {
        assert_eq!(
            fingerprint_tree(&consumer.path(dir.as_str())).unwrap(),
            fingerprint_tree(&author.path(dir.as_str())).unwrap(),
            "{dir} should match the author's copy"
        );
    }

    // Upstream changes: an agent is removed and the style rule rewritten
    update_remote(
        &remote,
        &[("remote-config/ai/.cursor/rules/style.md", "tabs, width 4")],
        &["remote-config/ai/.claude/agents/reviewer.md"],
    );
    let second = run_sync(&git, &options).unwrap();
    let SyncOutcome::Applied { backup, .. } = &second.outcome else {
        panic!("expected changes to be applied, got {:?}", second.outcome);
    };
    let backup = backup.as_ref().expect("second sync should back up");
    consumer.assert_file_eq(".cursor/rules/style.md", "tabs, width 4");
    consumer.assert_file_not_exists(".claude/agents/reviewer.md");

    // Syncing again is a no-op
    let third = run_sync(&git, &options).unwrap();
    assert!(matches!(third.outcome, SyncOutcome::UpToDate));

    // Roll back to the state captured before the second sync
    run_rollback(consumer.root(), &backup.id).unwrap();
    consumer.assert_file_eq(".cursor/rules/style.md", "tabs");
    consumer.assert_file_eq(".claude/agents/reviewer.md", "be strict");

    let snapshots = BackupManager::new(consumer.root()).list_snapshots().unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].id, backup.id);
}

#[test]
fn sync_report_serialises_for_scripts() {
    let remote_root = TempDir::new().unwrap();
    let remote = bare_remote(remote_root.path(), &[("remote-config/ai/.cursor/a.md", "a")]);
    let consumer = TestProject::new();
    let mut options = SyncOptions::new(consumer.root(), &settings(&remote));
    options.dry_run = true;

    let report = run_sync(&GitProvider::new(), &options).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["outcome"], "dry_run");
    assert_eq!(json["plans"][0]["status"], "created");
    assert_eq!(json["plans"][0]["added_files"], serde_json::json!(["a.md"]));
    assert_eq!(json["plans"][1]["status"], "absent_both");
    consumer.assert_file_not_exists(".cursor");
}
