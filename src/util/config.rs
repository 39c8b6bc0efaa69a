//! Configuration file support for Drydock.
//!
//! Drydock supports two configuration file locations:
//! - Global: `~/.config/drydock/config.toml` - User-wide defaults
//! - Project: `drydock.toml` in the working directory
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Drydock configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matrix generation settings
    pub matrix: MatrixConfig,

    /// Provisioning settings
    pub provision: ProvisionConfig,
}

/// Matrix generation settings from the `[matrix]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Exclusion rules to disable, by name
    #[serde(rename = "disabled-rules")]
    pub disabled_rules: Vec<String>,

    /// Extra known-broken compiler versions, as "family version" pairs
    /// (e.g. "gcc 4.8")
    #[serde(rename = "broken-versions")]
    pub broken_versions: Vec<String>,
}

/// Provisioning settings from the `[provision]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// System packages the build host must have
    pub packages: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't
    /// exist or fails to parse.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// List-valued settings are appended rather than replaced, so a project
    /// can extend the global rule toggles and package list.
    pub fn merge(&mut self, other: Config) {
        self.matrix
            .disabled_rules
            .extend(other.matrix.disabled_rules);
        self.matrix
            .broken_versions
            .extend(other.matrix.broken_versions);
        self.provision.packages.extend(other.provision.packages);
    }
}

/// Path to the project config file in a directory.
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join("drydock.toml")
}

/// Path to the global config file (`~/.config/drydock/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "drydock")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the effective configuration for a working directory: global
/// config first, then the project config merged over it.
pub fn load_config(cwd: &Path) -> Config {
    let mut config = global_config_path()
        .map(|path| Config::load_or_default(&path))
        .unwrap_or_default();

    config.merge(Config::load_or_default(&project_config_path(cwd)));
    config
}
