//! Data models for docwarn.
//!
//! - [`DisclaimerConfig`]: Discovery patterns, exclusion list, warning variants and
//!   classification rules loaded from `docwarn.yaml`
//! - [`Document`]: Line-oriented, copy-on-splice view of a document's content
//! - [`InsertionOutcome`] / [`RunSummary`]: Per-document results and batch tallies

pub mod config;
pub mod document;
pub mod outcome;

pub use config::{ConfigError, DisclaimerConfig, PathMatcher, VariantRule};
pub use document::Document;
pub use outcome::{DocumentReport, InsertionOutcome, OutcomeKind, RunSummary};
