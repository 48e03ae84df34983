//! Warning variant selection from a document's location.
//!
//! Rules are evaluated top to bottom and the first match wins. When nothing
//! matches, the configured default variant is returned, so selection never
//! fails once the selector is built.
//!
//! # Examples
//!
//! ```ignore
//! use docwarn::models::DisclaimerConfig;
//! use docwarn::services::VariantSelector;
//! use camino::Utf8Path;
//!
//! let selector = VariantSelector::from_config(&DisclaimerConfig::default(), Utf8Path::new("/repo"))?;
//! let variant = selector.select(Utf8Path::new("/repo/docs/production_forecast/cache.md"));
//! assert_eq!(variant.name, "production_forecast");
//! ```

use crate::models::{ConfigError, DisclaimerConfig, PathMatcher};
use camino::{Utf8Path, Utf8PathBuf};

/// A named warning block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningVariant {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    matcher: PathMatcher,
    variant: usize,
}

impl CompiledRule {
    fn matches(&self, relative: &Utf8Path) -> bool {
        match &self.matcher {
            PathMatcher::Contains(needles) => {
                needles.iter().any(|n| relative.as_str().contains(n.as_str()))
            }
            PathMatcher::Under(dir) => relative.starts_with(dir),
        }
    }
}

/// Maps a document path to exactly one [`WarningVariant`].
#[derive(Debug, Clone)]
pub struct VariantSelector {
    base_dir: Utf8PathBuf,
    variants: Vec<WarningVariant>,
    rules: Vec<CompiledRule>,
    default_variant: usize,
}

impl VariantSelector {
    /// Build a selector from the rule table in `config`.
    ///
    /// Paths given to [`select`](Self::select) are matched relative to
    /// `base_dir` when they live under it.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if a rule or the default names an undefined variant.
    pub fn from_config(config: &DisclaimerConfig, base_dir: &Utf8Path) -> Result<Self, ConfigError> {
        let variants: Vec<WarningVariant> = config
            .variants
            .iter()
            .map(|(name, text)| WarningVariant {
                name: name.clone(),
                text: text.clone(),
            })
            .collect();

        let mut rules = Vec::with_capacity(config.rules.len());
        for (index, rule) in config.rules.iter().enumerate() {
            let variant = config.variants.get_index_of(&rule.variant).ok_or_else(|| {
                ConfigError::UnknownRuleVariant {
                    index,
                    variant: rule.variant.clone(),
                }
            })?;
            rules.push(CompiledRule {
                matcher: rule.when.clone(),
                variant,
            });
        }

        let default_variant = config
            .variants
            .get_index_of(&config.default_variant)
            .ok_or_else(|| ConfigError::UnknownDefaultVariant(config.default_variant.clone()))?;

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            variants,
            rules,
            default_variant,
        })
    }

    /// Pick the variant for a document. Pure: depends on `path` only.
    pub fn select(&self, path: &Utf8Path) -> &WarningVariant {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);

        let index = self
            .rules
            .iter()
            .find(|rule| rule.matches(relative))
            .map_or(self.default_variant, |rule| rule.variant);

        tracing::trace!("Variant for {}: {}", path, self.variants[index].name);
        &self.variants[index]
    }
}
