//! Migration configuration

use crate::error::ConfigError;
use inferred_source::InjectionTemplate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one migration run
///
/// Every field has a default matching the `@nx/remix` plugin, so an empty
/// TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Absolute workspace root, used to relativize absolute option paths
    pub workspace_root: Option<PathBuf>,
    /// Executor whose targets are migrated; also the log source
    pub executor_name: String,
    /// Generator credited in the injected block
    pub generator_name: String,
    /// Config file names looked up under the project root, in order
    pub config_file_names: Vec<String>,
    /// Environment variable naming the active configuration at runtime
    pub configuration_env_var: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            workspace_root: None,
            executor_name: "@nx/remix:build".to_string(),
            generator_name: "@nx/remix:convert-to-inferred".to_string(),
            config_file_names: vec![
                "remix.config.js".to_string(),
                "remix.config.cjs".to_string(),
                "remix.config.mjs".to_string(),
            ],
            configuration_env_var: "NX_TASK_TARGET_CONFIGURATION".to_string(),
        }
    }
}

impl MigrationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns `ConfigError::Toml` for malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// With workspace root
    #[inline]
    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// With config file names
    #[must_use]
    pub fn with_config_file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_file_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// With configuration environment variable
    #[inline]
    #[must_use]
    pub fn with_configuration_env_var(mut self, var: impl Into<String>) -> Self {
        self.configuration_env_var = var.into();
        self
    }

    /// Template for the injected config value block
    #[must_use]
    pub fn injection_template(&self) -> InjectionTemplate {
        InjectionTemplate::default()
            .with_generator_name(self.generator_name.as_str())
            .with_env_var(self.configuration_env_var.as_str())
    }
}
