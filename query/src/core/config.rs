use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::registry::KubernetesAttributes;
use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME};

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Replaces the default kubernetes attribute set
    pub kubernetes_attributes: Option<Vec<String>>,
    /// Added on top of the base kubernetes attribute set
    pub extra_kubernetes_attributes: Option<Vec<String>>,
    /// Default output mode for `compile`
    pub parameterized: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence,
    /// extra attributes accumulate)
    fn merge(&mut self, other: FileConfig) {
        if other.kubernetes_attributes.is_some() {
            tracing::trace!(
                kubernetes_attributes = ?other.kubernetes_attributes,
                "Merging kubernetes_attributes"
            );
            self.kubernetes_attributes = other.kubernetes_attributes;
        }
        if let Some(extra) = other.extra_kubernetes_attributes {
            tracing::trace!(extra = ?extra, "Merging extra_kubernetes_attributes");
            self.extra_kubernetes_attributes
                .get_or_insert_with(Vec::new)
                .extend(extra);
        }
        if other.parameterized.is_some() {
            tracing::trace!(parameterized = ?other.parameterized, "Merging parameterized");
            self.parameterized = other.parameterized;
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub registry: KubernetesAttributes,
    pub parameterized: bool,
}

impl AppConfig {
    /// Load configuration with priority (later overrides earlier):
    /// 1. Defaults
    /// 2. Profile directory config (~/.loghouse/loghouse-query.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with_profile(get_profile_config_path(), cli)
    }

    /// Load configuration using an explicit profile config path
    fn load_with_profile(profile_path: Option<PathBuf>, cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = profile_path
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Self::from_file_config(file_config, cli)
    }

    /// Build the final configuration from merged file values and CLI overrides
    pub fn from_file_config(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let mut registry = match file_config.kubernetes_attributes {
            Some(names) => KubernetesAttributes::new(names)
                .context("Configuration error: kubernetes_attributes")?,
            None => KubernetesAttributes::defaults().clone(),
        };
        if let Some(extra) = file_config.extra_kubernetes_attributes {
            registry
                .extend(extra)
                .context("Configuration error: extra_kubernetes_attributes")?;
        }

        if registry.is_empty() {
            tracing::warn!("No kubernetes attributes configured, custom keys always use sparse lookups");
        }

        let parameterized = cli
            .parameterized
            .or(file_config.parameterized)
            .unwrap_or(false);

        tracing::debug!(
            kubernetes_attributes = registry.len(),
            parameterized,
            "Configuration loaded"
        );

        Ok(Self {
            registry,
            parameterized,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: KubernetesAttributes::defaults().clone(),
            parameterized: false,
        }
    }
}

/// Get the profile config path (~/.loghouse/loghouse-query.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
