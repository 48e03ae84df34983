use crate::models::DisclaimerConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name looked up in the base directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "docwarn.yaml";

/// Configuration manager for loading and saving the YAML disclaimer configuration.
///
/// A missing file is not an error: the built-in [`DisclaimerConfig::default`]
/// tables are used instead. Loaded configurations are validated before they
/// are returned.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for an explicit configuration file.
    pub fn new<P: AsRef<Utf8Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Create a ConfigManager for `docwarn.yaml` inside `base_dir`.
    pub fn for_base_dir<P: AsRef<Utf8Path>>(base_dir: P) -> Self {
        Self::new(base_dir.as_ref().join(DEFAULT_CONFIG_FILE))
    }

    /// Load and validate the configuration file.
    ///
    /// # Returns
    /// The loaded DisclaimerConfig, or defaults if the file doesn't exist
    pub fn load_config(&self) -> Result<DisclaimerConfig> {
        let config = if self.config_path.exists() {
            let file_contents = fs::read_to_string(&self.config_path)
                .with_context(|| format!("Failed to read config: {}", self.config_path))?;

            let config: DisclaimerConfig = serde_yaml_ng::from_str(&file_contents)
                .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

            tracing::info!("Loaded config from {}", self.config_path);
            config
        } else {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
            DisclaimerConfig::default()
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", self.config_path))?;

        tracing::debug!(
            "Config: {} patterns, {} exclusions, {} variants, {} rules",
            config.patterns.len(),
            config.exclusions.len(),
            config.variants.len(),
            config.rules.len()
        );

        Ok(config)
    }

    /// Save a configuration to the managed path.
    pub fn save_config(&self, config: &DisclaimerConfig) -> Result<()> {
        let yaml_string = Self::to_yaml(config)?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Serialize a configuration to YAML.
    pub fn to_yaml(config: &DisclaimerConfig) -> Result<String> {
        serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")
    }

    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
