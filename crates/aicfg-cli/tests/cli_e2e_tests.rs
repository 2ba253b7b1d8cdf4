//! CLI end-to-end tests that invoke the compiled `ai-config` binary.
//!
//! Each test runs against temporary project directories and a local bare
//! repository standing in for the shared configuration remote.

use std::path::Path;

use aicfg_test_utils::git::{bare_remote, file_at_branch, head_message};
use aicfg_test_utils::{ConfigTree, TestProject};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `ai-config` isolated from the developer's global config and env.
fn ai_config(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ai-config").expect("binary should be built");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("AI_CONFIG_REPO")
        .env_remove("AI_CONFIG_BRANCH")
        .env_remove("RUST_LOG");
    cmd
}

fn upstream(root: &Path) -> String {
    bare_remote(
        root,
        &[
            ("remote-config/ai/.cursor/rules/style.md", "tabs"),
            ("remote-config/ai/.claude/settings.json", "{\"model\":\"x\"}"),
        ],
    )
    .display()
    .to_string()
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    ai_config(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("rollback"));
}

#[test]
fn no_command_prints_hint() {
    let home = TempDir::new().unwrap();
    ai_config(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ai-config --help"));
}

#[test]
fn rollback_rejects_malformed_timestamp() {
    let home = TempDir::new().unwrap();
    let project = TestProject::new();
    ai_config(home.path())
        .args(["rollback", "last-week", "--target"])
        .arg(project.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYYMMDD-HHMMSS"));
}

#[test]
fn rollback_unknown_snapshot_names_path() {
    let home = TempDir::new().unwrap();
    let project = TestProject::new();
    ai_config(home.path())
        .args(["rollback", "20240101-000000", "--target"])
        .arg(project.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains(
            Path::new(".ai-config-backup")
                .join("20240101-000000")
                .display()
                .to_string(),
        ));
}

#[test]
fn missing_target_fails() {
    let home = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    ai_config(home.path())
        .args(["backups", "--target"])
        .arg(temp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn backups_json_on_fresh_project_is_empty_list() {
    let home = TempDir::new().unwrap();
    let project = TestProject::new();
    let output = ai_config(home.path())
        .args(["backups", "--json", "--target"])
        .arg(project.root())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn sync_then_rollback() {
    let home = TempDir::new().unwrap();
    let remote_root = TempDir::new().unwrap();
    let repo = upstream(remote_root.path());
    let project = TestProject::with_tree(
        &ConfigTree::new()
            .file(".cursor/rules/style.md", "spaces")
            .file(".cursor/local.md", "mine"),
    );

    ai_config(home.path())
        .args(["sync", "--repo", &repo, "--target"])
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Synchronization complete"));

    project.assert_file_eq(".cursor/rules/style.md", "tabs");
    project.assert_file_not_exists(".cursor/local.md");
    project.assert_file_eq(".claude/settings.json", "{\"model\":\"x\"}");

    let listing = ai_config(home.path())
        .args(["backups", "--json", "--target"])
        .arg(project.root())
        .output()
        .unwrap();
    let backups: serde_json::Value = serde_json::from_slice(&listing.stdout).unwrap();
    let id = backups[0]["id"].as_str().unwrap().to_string();

    ai_config(home.path())
        .args(["rollback", &id, "--target"])
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rollback completed"));

    project.assert_file_eq(".cursor/rules/style.md", "spaces");
    project.assert_file_eq(".cursor/local.md", "mine");
    // .claude was not part of the snapshot
    project.assert_file_exists(".claude/settings.json");
}

#[test]
fn pull_dry_run_json_changes_nothing() {
    let home = TempDir::new().unwrap();
    let remote_root = TempDir::new().unwrap();
    let repo = upstream(remote_root.path());
    let project = TestProject::new();

    let output = ai_config(home.path())
        .args(["pull", "--dry-run", "--json", "--repo", &repo, "--target"])
        .arg(project.root())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "dry_run");
    assert_eq!(report["plans"][0]["directory"], ".cursor");
    assert_eq!(report["plans"][0]["status"], "created");
    project.assert_file_not_exists(".cursor");
}

#[test]
fn sync_reports_missing_remote_dir() {
    let home = TempDir::new().unwrap();
    let remote_root = TempDir::new().unwrap();
    let repo = upstream(remote_root.path());
    let project = TestProject::new();

    ai_config(home.path())
        .args(["sync", "--remote-dir", "elsewhere", "--repo", &repo, "--target"])
        .arg(project.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ai-config push"));
}

#[test]
fn push_commits_local_configuration() {
    let home = TempDir::new().unwrap();
    let remote_root = TempDir::new().unwrap();
    let repo = upstream(remote_root.path());
    let project =
        TestProject::with_tree(&ConfigTree::new().file(".cursor/rules/style.md", "2 spaces"));

    ai_config(home.path())
        .args(["push", "-m", "share rules", "--repo", &repo, "--target"])
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pushed .cursor"));

    let bare = Path::new(&repo);
    assert_eq!(head_message(bare, "main"), "share rules");
    assert_eq!(
        file_at_branch(bare, "main", "remote-config/ai/.cursor/rules/style.md").as_deref(),
        Some("2 spaces")
    );
    assert_eq!(
        file_at_branch(bare, "main", "remote-config/ai/.claude/settings.json"),
        None
    );
}

#[test]
fn push_without_local_directories_fails() {
    let home = TempDir::new().unwrap();
    let remote_root = TempDir::new().unwrap();
    let repo = upstream(remote_root.path());
    let project = TestProject::new();

    ai_config(home.path())
        .args(["push", "--repo", &repo, "--target"])
        .arg(project.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to push"));
}

#[test]
fn project_config_file_selects_remote_dir() {
    let home = TempDir::new().unwrap();
    let remote_root = TempDir::new().unwrap();
    let repo = bare_remote(remote_root.path(), &[("shared/.cursor/a.md", "a")]);
    let project = TestProject::new();
    project.write(
        ".ai-config.toml",
        &format!("repo = {:?}\nremote-dir = \"shared\"\n", repo.display().to_string()),
    );

    ai_config(home.path())
        .args(["sync", "--target"])
        .arg(project.root())
        .assert()
        .success();

    project.assert_file_eq(".cursor/a.md", "a");
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    ai_config(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ai-config"));
}
