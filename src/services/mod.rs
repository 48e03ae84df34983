//! Services module - business logic for inserting scope warnings into documents.
//!
//! The services have no dependency on the CLI layer: every input is an explicit
//! parameter and file access goes through the [`DocumentStore`] trait.
//!
//! # Components
//!
//! - [`VariantSelector`]: Maps a document path to one warning variant using an
//!   ordered rule table with a mandatory default
//! - [`InsertionPointLocator`]: Scans a document's lines for the first title and
//!   the rule or section heading that follows it
//! - [`DisclaimerPatcher`]: Exclusion check, marker check, locate, splice and
//!   persist for one document, folded into an [`InsertionOutcome`](crate::models::InsertionOutcome)
//! - [`BatchRunner`]: Runs the patcher over many documents with bounded
//!   concurrency and cancellation
//! - [`discover_documents`]: Glob-based candidate discovery
//! - [`FsDocumentStore`]: Strict UTF-8 reads and atomic writes
//!
//! # Usage Example
//!
//! ```ignore
//! use docwarn::models::DisclaimerConfig;
//! use docwarn::services::{discover_documents, BatchRunner, DisclaimerPatcher, FsDocumentStore};
//!
//! let config = DisclaimerConfig::default();
//! let patcher = DisclaimerPatcher::from_config(&config, base_dir)?;
//! let paths = discover_documents(base_dir, &config.patterns, config.deduplicate)?;
//!
//! let runner = BatchRunner::new(patcher, Arc::new(FsDocumentStore::new()), config.max_concurrent);
//! let report = runner.run(paths, cancel_rx).await;
//! ```

pub mod batch;
pub mod discovery;
pub mod locator;
pub mod patcher;
pub mod storage;
pub mod variant;

pub use batch::{BatchReport, BatchRunner};
pub use discovery::{DiscoveryError, discover_documents};
pub use locator::InsertionPointLocator;
pub use patcher::{DisclaimerPatcher, ExclusionSet, PatchMode, PatchPlan};
pub use storage::{DocumentStore, FsDocumentStore, StorageError};
pub use variant::{VariantSelector, WarningVariant};
