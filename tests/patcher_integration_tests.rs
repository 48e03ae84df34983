//! Integration tests for DisclaimerPatcher
//!
//! These tests verify:
//! - Insertion against real files on disk
//! - Skip behaviour for excluded, already patched and unstructured documents
//! - Re-running over a partially patched set
//! - Containment of read and write failures

use camino::{Utf8Path, Utf8PathBuf};
use docwarn::models::{DisclaimerConfig, InsertionOutcome, OutcomeKind};
use docwarn::services::{DisclaimerPatcher, DocumentStore, FsDocumentStore, StorageError};
use mockall::mock;
use std::fs;
use tempfile::TempDir;

mock! {
    pub Store {}

    impl DocumentStore for Store {
        fn read(&self, path: &Utf8Path) -> Result<String, StorageError>;
        fn write(&self, path: &Utf8Path, content: &str) -> Result<(), StorageError>;
    }
}

fn create_test_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let base = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, base)
}

fn write_doc(base: &Utf8Path, rel: &str, content: &str) -> Utf8PathBuf {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn patcher(base: &Utf8Path) -> DisclaimerPatcher {
    DisclaimerPatcher::from_config(&DisclaimerConfig::default(), base).unwrap()
}

#[test]
fn test_title_without_anchor_is_left_alone() {
    let (_dir, base) = create_test_dir();
    let path = write_doc(&base, "docs/plain.md", "# Title\n\nSome text\n");

    let outcome = patcher(&base).patch(&path, &FsDocumentStore::new());

    assert_eq!(outcome.kind(), OutcomeKind::SkippedNoInsertionPoint);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# Title\n\nSome text\n");
}

#[test]
fn test_insert_after_horizontal_rule() {
    let (_dir, base) = create_test_dir();
    let path = write_doc(&base, "docs/guide.md", "# Title\n---\n## Next\n");

    let outcome = patcher(&base).patch(&path, &FsDocumentStore::new());
    assert!(matches!(outcome, InsertionOutcome::Updated { line: 2, .. }));

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(lines[0], "# Title");
    assert_eq!(lines[1], "---");
    // The block starts with an empty line, then the warning heading
    assert_eq!(lines[2], "");
    assert!(lines[3].starts_with("## ⚠️ CRITICAL - ProductionForecast"));
    assert!(content.ends_with("---\n\n## Next\n"));
}

#[test]
fn test_variant_follows_location() {
    let (_dir, base) = create_test_dir();
    let store = FsDocumentStore::new();
    let p = patcher(&base);

    let cases = [
        ("docs/production_forecast/cache.md", "production_forecast", "Caching & Messaging"),
        ("docs/infrastructure/redis.md", "infrastructure", "SHARED INFRASTRUCTURE"),
        ("docs/api/usage.md", "docs", "may describe infrastructure capabilities"),
        ("notes/meeting.md", "infrastructure", "SHARED INFRASTRUCTURE"),
    ];

    for (rel, expected_variant, expected_text) in cases {
        let path = write_doc(&base, rel, "# Doc\n\n## Section\n");
        match p.patch(&path, &store) {
            InsertionOutcome::Updated { variant, line } => {
                assert_eq!(variant, expected_variant, "variant for {}", rel);
                assert_eq!(line, 2);
            }
            other => panic!("expected update for {}, got {:?}", rel, other),
        }
        assert!(fs::read_to_string(&path).unwrap().contains(expected_text));
    }
}

#[test]
fn test_marker_present_is_skipped_on_every_run() {
    let (_dir, base) = create_test_dir();
    let original = "# Title\n\nSee CRITICAL - ProductionForecast notes.\n## Next\n";
    let path = write_doc(&base, "docs/done.md", original);
    let p = patcher(&base);

    for _ in 0..3 {
        let outcome = p.patch(&path, &FsDocumentStore::new());
        assert_eq!(outcome.kind(), OutcomeKind::SkippedAlreadyPresent);
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_excluded_basename_never_changes() {
    let (_dir, base) = create_test_dir();
    let original = "# Plan\n---\n## Steps\n";
    let path = write_doc(&base, "notes/DOCUMENTATION_MAP.md", original);

    let outcome = patcher(&base).patch(&path, &FsDocumentStore::new());

    assert_eq!(outcome.kind(), OutcomeKind::SkippedExcluded);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_second_run_changes_nothing() {
    let (_dir, base) = create_test_dir();
    let docs = [
        write_doc(&base, "docs/a.md", "# A\n---\nbody\n"),
        write_doc(&base, "docs/b.md", "# B\n\n## One\n## Two\n"),
        write_doc(&base, "docs/c.md", "no heading here\n"),
        write_doc(&base, "UPDATE_PLAN.md", "# Plan\n## Step\n"),
    ];
    let store = FsDocumentStore::new();
    let p = patcher(&base);

    let first: Vec<OutcomeKind> = docs.iter().map(|d| p.patch(d, &store).kind()).collect();
    let after_first: Vec<String> = docs.iter().map(|d| fs::read_to_string(d).unwrap()).collect();

    let second: Vec<OutcomeKind> = docs.iter().map(|d| p.patch(d, &store).kind()).collect();
    let after_second: Vec<String> = docs.iter().map(|d| fs::read_to_string(d).unwrap()).collect();

    assert_eq!(
        first,
        vec![
            OutcomeKind::Updated,
            OutcomeKind::Updated,
            OutcomeKind::SkippedNoInsertionPoint,
            OutcomeKind::SkippedExcluded,
        ]
    );
    assert_eq!(
        second,
        vec![
            OutcomeKind::SkippedAlreadyPresent,
            OutcomeKind::SkippedAlreadyPresent,
            OutcomeKind::SkippedNoInsertionPoint,
            OutcomeKind::SkippedExcluded,
        ]
    );
    assert_eq!(after_first, after_second);
}

#[test]
fn test_unreadable_document_is_reported() {
    let (_dir, base) = create_test_dir();
    let path = base.join("docs/binary.md");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, [0x23, 0x20, 0xff, 0xfe, 0x0a]).unwrap();

    match patcher(&base).patch(&path, &FsDocumentStore::new()) {
        InsertionOutcome::Failed(e) => {
            assert!(e.is_read_failure());
            assert_eq!(e.path(), path.as_path());
        }
        other => panic!("expected read failure, got {:?}", other),
    }
}

#[test]
fn test_write_failure_is_reported_and_not_retried() {
    let mut store = MockStore::new();
    store
        .expect_read()
        .times(1)
        .returning(|_| Ok("# T\n## A\n".to_string()));
    store.expect_write().times(1).returning(|path, _| {
        Err(StorageError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other("disk full"),
        })
    });

    let outcome = patcher(Utf8Path::new("/repo")).patch(Utf8Path::new("/repo/docs/a.md"), &store);

    match outcome {
        InsertionOutcome::Failed(e) => {
            assert!(!e.is_read_failure());
            assert!(e.to_string().contains("disk full"));
        }
        other => panic!("expected write failure, got {:?}", other),
    }
}

#[test]
fn test_excluded_document_is_never_read() {
    let mut store = MockStore::new();
    store.expect_read().never();
    store.expect_write().never();

    let outcome = patcher(Utf8Path::new("/repo"))
        .patch(Utf8Path::new("/repo/docs/PROJECT_SUMMARY.md"), &store);

    assert_eq!(outcome.kind(), OutcomeKind::SkippedExcluded);
}

#[test]
fn test_written_content_is_the_spliced_document() {
    let mut store = MockStore::new();
    store
        .expect_read()
        .returning(|_| Ok("# Title\r\nintro\r\n## Next\r\n".to_string()));
    store
        .expect_write()
        .withf(|_, content: &str| {
            content.starts_with("# Title\r\nintro\r\n\n## ⚠️")
                && content.ends_with("---\n\n## Next\r\n")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let outcome = patcher(Utf8Path::new("/repo")).patch(Utf8Path::new("/repo/README.md"), &store);
    assert!(matches!(outcome, InsertionOutcome::Updated { line: 2, .. }));
}

#[cfg(unix)]
#[test]
fn test_symlinked_document_patches_its_target() {
    let (_dir, base) = create_test_dir();
    let real = write_doc(&base, "shared/real.md", "# Shared\n## Part\n");
    let link = base.join("docs/link.md");
    fs::create_dir_all(link.parent().unwrap()).unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let outcome = patcher(&base).patch(&link, &FsDocumentStore::new());

    assert_eq!(outcome.kind(), OutcomeKind::Updated);
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert!(fs::read_to_string(&real).unwrap().contains("CRITICAL - ProductionForecast"));
}
