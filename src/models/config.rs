use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default idempotence marker. Every built-in variant contains it.
pub const DEFAULT_MARKER: &str = "CRITICAL - ProductionForecast";

/// Heading prefix used by every inserted warning block.
pub const DEFAULT_WARNING_HEADING_PREFIX: &str = "## ⚠️";

const PRODUCTION_FORECAST_TEXT: &str = "
## ⚠️ CRITICAL - ProductionForecast Caching & Messaging

**ProductionForecast uses:**
- ✅ IMemoryCache (local in-memory cache ONLY)
- ✅ OutputCache middleware (ASP.NET Core)
- ✅ Electric.Core for CDC (Change Data Capture - cache invalidation trigger)

**ProductionForecast does NOT use:**
- ❌ Redis (no distributed cache)
- ❌ Apache Pulsar (no messaging)
- ❌ DistributedDataManager
- ❌ Electric.Core Pulsar features

---
";

const INFRASTRUCTURE_TEXT: &str = "
## ⚠️ CRITICAL - ProductionForecast Service Scope

**ProductionForecast uses ONLY:**
- ✅ IMemoryCache (local in-memory cache)
- ✅ Electric.Core for CDC (Change Data Capture ONLY - table change tracking)
- ✅ Entity Framework Core

**ProductionForecast does NOT use:**
- ❌ Redis distributed caching
- ❌ Apache Pulsar messaging
- ❌ Electric.Core messaging/Pulsar features

**This document describes SHARED INFRASTRUCTURE.**
Other services (NotificationService) may use Redis/Pulsar.

---
";

const DOCS_TEXT: &str = "
## ⚠️ CRITICAL - ProductionForecast Service Scope

**This document may describe infrastructure capabilities (Redis, Pulsar, etc.).**

**ProductionForecast ACTUALLY uses ONLY:**
- ✅ IMemoryCache (local in-memory cache)
- ✅ Electric.Core for CDC (Change Data Capture ONLY)
- ✅ Entity Framework Core

**ProductionForecast does NOT use:**
- ❌ Redis
- ❌ Apache Pulsar
- ❌ Distributed caching
- ❌ Message bus

Other services (NotificationService) may use these technologies.

---
";

/// Errors found while validating a [`DisclaimerConfig`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Rule {index} refers to unknown variant '{variant}'")]
    UnknownRuleVariant { index: usize, variant: String },

    #[error("Default variant '{0}' is not defined")]
    UnknownDefaultVariant(String),

    #[error("Variant '{0}' does not contain the idempotence marker")]
    VariantMissingMarker(String),

    #[error("Idempotence marker must not be empty")]
    EmptyMarker,

    #[error("At least one discovery pattern is required")]
    NoPatterns,

    #[error("max_concurrent must be at least 1")]
    ZeroConcurrency,
}

/// Path condition attached to a variant rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMatcher {
    /// Matches when the document path contains any of the substrings
    Contains(Vec<String>),

    /// Matches when the document lives under this directory, relative to the base directory
    Under(String),
}

/// One entry of the ordered classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRule {
    #[serde(with = "serde_yaml_ng::with::singleton_map")]
    pub when: PathMatcher,
    pub variant: String,
}

impl VariantRule {
    pub fn contains(needles: &[&str], variant: &str) -> Self {
        Self {
            when: PathMatcher::Contains(needles.iter().map(|s| s.to_string()).collect()),
            variant: variant.to_string(),
        }
    }

    pub fn under(dir: &str, variant: &str) -> Self {
        Self {
            when: PathMatcher::Under(dir.to_string()),
            variant: variant.to_string(),
        }
    }
}

/// Disclaimer configuration loaded from `docwarn.yaml`.
///
/// Holds every constant table the patcher needs: discovery patterns, the
/// exclusion list, the warning variants and the rules choosing between them.
/// Keys missing from the file fall back to [`DisclaimerConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclaimerConfig {
    pub patterns: Vec<String>,
    pub exclusions: Vec<String>,
    pub marker: String,
    pub warning_heading_prefix: String,
    pub variants: IndexMap<String, String>,
    pub rules: Vec<VariantRule>,
    pub default_variant: String,
    pub max_concurrent: usize,
    pub deduplicate: bool,
}

impl Default for DisclaimerConfig {
    fn default() -> Self {
        let mut variants = IndexMap::new();
        variants.insert(
            "production_forecast".to_string(),
            PRODUCTION_FORECAST_TEXT.to_string(),
        );
        variants.insert("infrastructure".to_string(), INFRASTRUCTURE_TEXT.to_string());
        variants.insert("docs".to_string(), DOCS_TEXT.to_string());

        Self {
            patterns: vec![
                "docs/**/*.md".to_string(),
                "notes/**/*.md".to_string(),
                "*.md".to_string(),
            ],
            exclusions: vec![
                "ACTUAL_DEPENDENCIES.md".to_string(),
                "UPDATE_PLAN.md".to_string(),
                "DOCUMENTATION_INDEX.md".to_string(),
                "PROJECT_SUMMARY.md".to_string(),
                "DOCUMENTATION_MAP.md".to_string(),
                "part_1_core_infrastructure_services.md".to_string(),
                "part_2_cdc_workers_communication.md".to_string(),
                "part_3_docker_deployment_network.md".to_string(),
                "part_1_web_api_layer.md".to_string(),
            ],
            marker: DEFAULT_MARKER.to_string(),
            warning_heading_prefix: DEFAULT_WARNING_HEADING_PREFIX.to_string(),
            variants,
            rules: vec![
                VariantRule::contains(&["production_forecast"], "production_forecast"),
                VariantRule::contains(&["infrastructure", "level_1"], "infrastructure"),
                VariantRule::under("docs", "docs"),
            ],
            default_variant: "infrastructure".to_string(),
            max_concurrent: 1,
            deduplicate: true,
        }
    }
}

impl DisclaimerConfig {
    /// Check cross-references between rules, variants and the marker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        if self.patterns.is_empty() {
            return Err(ConfigError::NoPatterns);
        }
        if self.max_concurrent == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if !self.variants.contains_key(&rule.variant) {
                return Err(ConfigError::UnknownRuleVariant {
                    index,
                    variant: rule.variant.clone(),
                });
            }
        }

        if !self.variants.contains_key(&self.default_variant) {
            return Err(ConfigError::UnknownDefaultVariant(
                self.default_variant.clone(),
            ));
        }

        // A block without the marker would be inserted again on every run
        if let Some((name, _)) = self
            .variants
            .iter()
            .find(|(_, text)| !text.contains(&self.marker))
        {
            return Err(ConfigError::VariantMissingMarker(name.clone()));
        }

        Ok(())
    }
}
