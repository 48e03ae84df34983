//! Property tests for the locator and the patcher.

use camino::{Utf8Path, Utf8PathBuf};
use docwarn::models::{DisclaimerConfig, Document, OutcomeKind};
use docwarn::models::config::DEFAULT_WARNING_HEADING_PREFIX;
use docwarn::services::{
    DisclaimerPatcher, FsDocumentStore, InsertionPointLocator, PatchPlan, VariantSelector,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("# Title".to_string()),
        Just("## Section".to_string()),
        Just("---".to_string()),
        Just("-----".to_string()),
        Just("## ⚠️ Old warning".to_string()),
        Just("  ## Indented".to_string()),
        Just("#NoSpace".to_string()),
        Just(String::new()),
        "[a-z ]{1,20}",
    ]
}

fn content() -> impl Strategy<Value = String> {
    (prop::collection::vec(line(), 0..16), any::<bool>()).prop_map(|(lines, crlf)| {
        let sep = if crlf { "\r\n" } else { "\n" };
        lines.join(sep)
    })
}

fn doc_path() -> impl Strategy<Value = Utf8PathBuf> {
    prop::collection::vec(
        prop_oneof![
            Just("docs"),
            Just("notes"),
            Just("production_forecast"),
            Just("infrastructure"),
            Just("level_1"),
            Just("api"),
        ],
        0..4,
    )
    .prop_map(|dirs| {
        let mut path = Utf8PathBuf::from("/repo");
        for dir in dirs {
            path.push(dir);
        }
        path.push("page.md");
        path
    })
}

fn patcher() -> DisclaimerPatcher {
    DisclaimerPatcher::from_config(&DisclaimerConfig::default(), Utf8Path::new("/repo")).unwrap()
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn second_plan_is_already_present(text in content(), path in doc_path()) {
        let p = patcher();
        if let PatchPlan::Insert { document, .. } = p.plan(&path, &text) {
            prop_assert_eq!(p.plan(&path, &document.render()), PatchPlan::AlreadyPresent);
        }
    }

    #[test]
    fn insertion_only_adds(text in content(), path in doc_path()) {
        let p = patcher();
        if let PatchPlan::Insert { line, document, variant } = p.plan(&path, &text) {
            let mut lines = document.lines().to_vec();
            prop_assert_eq!(&lines[line], &variant.text);
            lines.remove(line);
            prop_assert_eq!(lines.join("\n"), text);
        }
    }

    #[test]
    fn insertion_point_follows_title(text in content()) {
        let doc = Document::parse(&text);
        let locator = InsertionPointLocator::new(DEFAULT_WARNING_HEADING_PREFIX);

        let title = doc.lines().iter().position(|l| l.trim().starts_with("# "));
        match (title, locator.locate(doc.lines())) {
            (None, found) => prop_assert_eq!(found, None),
            (Some(title), Some(index)) => {
                prop_assert!(index > title);
                // A rule on the last line without a trailing newline appends at len
                prop_assert!(index <= doc.len());
            }
            (Some(_), None) => {}
        }
    }

    #[test]
    fn selection_depends_only_on_path(path in doc_path()) {
        let selector =
            VariantSelector::from_config(&DisclaimerConfig::default(), Utf8Path::new("/repo")).unwrap();
        let first = selector.select(&path).name.clone();
        prop_assert_eq!(&selector.select(&path).name, &first);
        prop_assert!(["production_forecast", "infrastructure", "docs"].contains(&first.as_str()));
    }

    #[test]
    fn excluded_basename_is_skipped_without_reading(dir in doc_path()) {
        let p = patcher();
        let store = FsDocumentStore::new();

        for name in &DisclaimerConfig::default().exclusions {
            // The file does not exist, so any read would fail
            let path = dir.with_file_name(name);
            prop_assert_eq!(p.patch(&path, &store).kind(), OutcomeKind::SkippedExcluded);
        }
    }
}
