use crate::models::{ConfigError, DisclaimerConfig, Document, InsertionOutcome};
use crate::services::locator::InsertionPointLocator;
use crate::services::storage::DocumentStore;
use crate::services::variant::{VariantSelector, WarningVariant};
use camino::Utf8Path;
use std::collections::HashSet;

/// Basenames that must never be modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Exact basename match; the rest of the path is ignored
    pub fn contains(&self, path: &Utf8Path) -> bool {
        path.file_name().is_some_and(|name| self.0.contains(name))
    }
}

/// Whether a planned insertion is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchMode {
    #[default]
    Write,
    DryRun,
}

/// Decision for one document's content, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchPlan<'a> {
    AlreadyPresent,
    NoInsertionPoint,
    Insert {
        line: usize,
        variant: &'a WarningVariant,
        document: Document,
    },
}

/// Inserts a warning block into a document at most once.
///
/// Per document: exclusion check on the basename, one read, marker check,
/// locate, splice, and at most one write. Every failure is folded into the
/// returned [`InsertionOutcome`]; nothing here aborts a batch.
///
/// Re-running over the same documents is safe: a patched document carries
/// the marker and short-circuits before the locator runs.
#[derive(Debug, Clone)]
pub struct DisclaimerPatcher {
    exclusions: ExclusionSet,
    marker: String,
    locator: InsertionPointLocator,
    selector: VariantSelector,
    mode: PatchMode,
}

impl DisclaimerPatcher {
    pub fn new(
        exclusions: ExclusionSet,
        marker: impl Into<String>,
        locator: InsertionPointLocator,
        selector: VariantSelector,
    ) -> Self {
        Self {
            exclusions,
            marker: marker.into(),
            locator,
            selector,
            mode: PatchMode::Write,
        }
    }

    /// Build a patcher from a validated configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found by [`DisclaimerConfig::validate`].
    pub fn from_config(config: &DisclaimerConfig, base_dir: &Utf8Path) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::new(
            ExclusionSet::new(config.exclusions.iter().cloned()),
            config.marker.clone(),
            InsertionPointLocator::new(&config.warning_heading_prefix),
            VariantSelector::from_config(config, base_dir)?,
        ))
    }

    pub fn with_mode(mut self, mode: PatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> PatchMode {
        self.mode
    }

    /// Decide what to do with `content` without touching storage.
    pub fn plan(&self, path: &Utf8Path, content: &str) -> PatchPlan<'_> {
        if content.contains(&self.marker) {
            return PatchPlan::AlreadyPresent;
        }

        let document = Document::parse(content);
        let Some(line) = self.locator.locate(document.lines()) else {
            return PatchPlan::NoInsertionPoint;
        };

        let variant = self.selector.select(path);
        PatchPlan::Insert {
            line,
            variant,
            document: document.with_block_inserted(line, &variant.text),
        }
    }

    /// Run the full check-locate-splice-persist cycle for one document.
    pub fn patch(&self, path: &Utf8Path, store: &dyn DocumentStore) -> InsertionOutcome {
        if self.exclusions.contains(path) {
            tracing::debug!("Skipping {} (excluded)", path);
            return InsertionOutcome::SkippedExcluded;
        }

        let content = match store.read(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("{}", e);
                return InsertionOutcome::Failed(e);
            }
        };

        match self.plan(path, &content) {
            PatchPlan::AlreadyPresent => {
                tracing::debug!("Skipping {} (disclaimer already present)", path);
                InsertionOutcome::SkippedAlreadyPresent
            }
            PatchPlan::NoInsertionPoint => {
                tracing::warn!("Could not find insertion point in {}", path);
                InsertionOutcome::SkippedNoInsertionPoint
            }
            PatchPlan::Insert {
                line,
                variant,
                document,
            } => {
                let variant = variant.name.clone();

                if self.mode == PatchMode::DryRun {
                    tracing::info!("Would insert {} warning into {} at line {}", variant, path, line + 1);
                    return InsertionOutcome::WouldUpdate { variant, line };
                }

                match store.write(path, &document.render()) {
                    Ok(()) => {
                        tracing::info!("Inserted {} warning into {} at line {}", variant, path, line + 1);
                        InsertionOutcome::Updated { variant, line }
                    }
                    Err(e) => {
                        tracing::error!("{}", e);
                        InsertionOutcome::Failed(e)
                    }
                }
            }
        }
    }
}
