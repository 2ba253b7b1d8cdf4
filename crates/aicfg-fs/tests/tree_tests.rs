//! Tests for fingerprinting, listing, copying and removing configuration trees

use aicfg_fs::{CHUNK_SIZE, copy_tree, fingerprint_tree, hash_reader, list_files, remove_tree};
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;

fn digest(content: &[u8]) -> String {
    hash_reader(content, CHUNK_SIZE).unwrap()
}

#[test]
fn fingerprint_missing_equals_empty() {
    let temp = assert_fs::TempDir::new().unwrap();
    let empty = temp.child("empty");
    empty.create_dir_all().unwrap();

    let missing = fingerprint_tree(temp.child("missing").path()).unwrap();
    let existing = fingerprint_tree(empty.path()).unwrap();

    assert!(missing.is_empty());
    assert_eq!(missing, existing);
}

#[test]
fn fingerprint_keys_are_relative_and_nested() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".cursor/rules.md").write_str("# rules").unwrap();
    temp.child(".cursor/rules/python/style.mdc").write_str("style").unwrap();

    let fingerprint = fingerprint_tree(temp.child(".cursor").path()).unwrap();

    let keys: Vec<&str> = fingerprint.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["rules.md", "rules/python/style.mdc"]);
    assert_eq!(fingerprint["rules.md"], digest(b"# rules"));
}

#[test]
fn fingerprint_ignores_empty_directories() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".claude/commands").create_dir_all().unwrap();
    temp.child(".claude/settings.json").write_str("{}").unwrap();

    let fingerprint = fingerprint_tree(temp.child(".claude").path()).unwrap();
    assert_eq!(fingerprint.len(), 1);
    assert!(fingerprint.contains_key("settings.json"));
}

#[test]
fn identical_content_has_identical_digest_across_trees() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a/rules.md").write_str("same").unwrap();
    temp.child("b/rules.md").write_str("same").unwrap();
    temp.child("b/other.md").write_str("different").unwrap();

    let a = fingerprint_tree(temp.child("a").path()).unwrap();
    let b = fingerprint_tree(temp.child("b").path()).unwrap();

    assert_eq!(a["rules.md"], b["rules.md"]);
    assert_ne!(b["rules.md"], b["other.md"]);
}

#[test]
fn list_files_is_sorted() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("z.md").write_str("z").unwrap();
    temp.child("a/b.md").write_str("b").unwrap();
    temp.child("m.md").write_str("m").unwrap();

    let files = list_files(temp.path()).unwrap();
    assert_eq!(files, vec!["a/b.md", "m.md", "z.md"]);
}

#[test]
fn list_files_missing_root_is_empty() {
    let temp = assert_fs::TempDir::new().unwrap();
    assert!(list_files(temp.child("nope").path()).unwrap().is_empty());
}

#[test]
fn copy_tree_reproduces_fingerprint() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/rules.md").write_str("# rules").unwrap();
    temp.child("src/nested/deep/agent.md").write_str("agent").unwrap();
    temp.child("src/empty").create_dir_all().unwrap();

    copy_tree(temp.child("src").path(), temp.child("out/dst").path()).unwrap();

    temp.child("out/dst/rules.md").assert("# rules");
    temp.child("out/dst/nested/deep/agent.md").assert("agent");
    temp.child("out/dst/empty").assert(predicate::path::is_dir());
    assert_eq!(
        fingerprint_tree(temp.child("src").path()).unwrap(),
        fingerprint_tree(temp.child("out/dst").path()).unwrap()
    );
}

#[test]
fn remove_tree_deletes_everything() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".claude/agents/reviewer.md").write_str("x").unwrap();

    remove_tree(temp.child(".claude").path()).unwrap();

    temp.child(".claude").assert(predicate::path::missing());
}

#[test]
fn hashing_a_vanished_file_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("tree/file.md").write_str("x").unwrap();
    let root = temp.child("tree");

    let fingerprint = fingerprint_tree(root.path()).unwrap();
    fs::remove_file(root.child("file.md").path()).unwrap();

    assert_eq!(fingerprint.len(), 1);
    assert!(aicfg_fs::hash_file(root.child("file.md").path()).is_err());
}

#[cfg(unix)]
mod symlinks {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::symlink;

    #[test]
    fn file_symlink_is_hashed_as_target_content() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".cursor/shared/base.md").write_str("base rules").unwrap();
        symlink(
            temp.child(".cursor/shared/base.md").path(),
            temp.child(".cursor/base.md").path(),
        )
        .unwrap();

        let fingerprint = fingerprint_tree(temp.child(".cursor").path()).unwrap();
        assert_eq!(fingerprint["base.md"], digest(b"base rules"));
        assert_eq!(fingerprint["shared/base.md"], digest(b"base rules"));
    }

    #[test]
    fn directory_symlink_is_traversed() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".cursor/common/rules/a.md").write_str("a").unwrap();
        symlink(
            temp.child(".cursor/common/rules").path(),
            temp.child(".cursor/rules").path(),
        )
        .unwrap();

        let files = list_files(temp.child(".cursor").path()).unwrap();
        assert_eq!(files, vec!["common/rules/a.md", "rules/a.md"]);
    }

    #[test]
    fn dangling_symlink_is_skipped() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".claude/keep.md").write_str("keep").unwrap();
        symlink(
            temp.child("does-not-exist").path(),
            temp.child(".claude/broken.md").path(),
        )
        .unwrap();

        let fingerprint = fingerprint_tree(temp.child(".claude").path()).unwrap();
        assert_eq!(fingerprint.len(), 1);
        assert!(fingerprint.contains_key("keep.md"));
    }

    #[test]
    fn links_leaving_the_root_are_not_followed() {
        let outside = assert_fs::TempDir::new().unwrap();
        outside.child("id_rsa").write_str("PRIVATE KEY").unwrap();
        outside.child("secrets/token").write_str("t0ken").unwrap();

        let clone = assert_fs::TempDir::new().unwrap();
        clone.child(".cursor/rules.md").write_str("rules").unwrap();
        clone.child("README.md").write_str("sibling").unwrap();
        symlink(
            outside.child("id_rsa").path(),
            clone.child(".cursor/leak.md").path(),
        )
        .unwrap();
        symlink(
            outside.child("secrets").path(),
            clone.child(".cursor/secrets").path(),
        )
        .unwrap();
        symlink(
            clone.child("README.md").path(),
            clone.child(".cursor/readme.md").path(),
        )
        .unwrap();
        let root = clone.child(".cursor");

        let fingerprint = fingerprint_tree(root.path()).unwrap();
        let keys: Vec<&str> = fingerprint.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["rules.md"]);
        assert_eq!(list_files(root.path()).unwrap(), vec!["rules.md"]);

        let project = assert_fs::TempDir::new().unwrap();
        copy_tree(root.path(), project.child(".cursor").path()).unwrap();
        project.child(".cursor/rules.md").assert("rules");
        project.child(".cursor/leak.md").assert(predicate::path::missing());
        project.child(".cursor/secrets").assert(predicate::path::missing());
        project.child(".cursor/readme.md").assert(predicate::path::missing());
    }

    #[test]
    fn copy_tree_materialises_symlinks() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/shared/base.md").write_str("base").unwrap();
        symlink(
            temp.child("src/shared/base.md").path(),
            temp.child("src/base.md").path(),
        )
        .unwrap();

        copy_tree(temp.child("src").path(), temp.child("dst").path()).unwrap();

        let copied = temp.child("dst/base.md");
        copied.assert("base");
        let metadata = fs::symlink_metadata(copied.path()).unwrap();
        assert!(!metadata.file_type().is_symlink());
    }
}
