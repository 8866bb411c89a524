//! # Runtime Configuration Module
//!
//! Router-wide link generation defaults and identifier separators.
//!
//! ## Sources
//!
//! - [`RouterConfig::default()`] - relative friendly links, `:` module separator
//! - [`RouterConfig::from_env()`] - environment variables, see below
//! - [`RouterConfig::from_yaml_str()`] / [`RouterConfig::from_yaml_file()`] - a YAML document
//!
//! ## Environment Variables
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `BIDIROUTER_NORMAL_LINKS` | `normal_links` | `false` |
//! | `BIDIROUTER_ABSOLUTE_LINKS` | `absolute_links` | `false` |
//! | `BIDIROUTER_MODULE_SEPARATOR` | `module_separator` | `:` |
//! | `BIDIROUTER_NAMESPACE_SEPARATOR` | `namespace_separator` | `::` |
//! | `BIDIROUTER_NAMESPACE_CONTROLLER` | `namespace_controller` | `controller` |
//!
//! Unparseable or empty values fall back to the default.
//!
//! ## Example Configuration
//!
//! ```yaml
//! normal_links: false
//! absolute_links: true
//! module_separator: ":"
//! namespace_separator: "::"
//! namespace_controller: controller
//! ```

use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Always generate query-string links instead of friendly ones
    pub normal_links: bool,
    /// Always generate absolute links
    pub absolute_links: bool,
    /// Separator between identifier segments
    pub module_separator: String,
    /// Separator used in resolved controller paths
    pub namespace_separator: String,
    /// Segment inserted between module and controller path
    pub namespace_controller: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            normal_links: false,
            absolute_links: false,
            module_separator: ":".to_string(),
            namespace_separator: "::".to_string(),
            namespace_controller: "controller".to_string(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            normal_links: env_flag("BIDIROUTER_NORMAL_LINKS", defaults.normal_links),
            absolute_links: env_flag("BIDIROUTER_ABSOLUTE_LINKS", defaults.absolute_links),
            module_separator: env_string("BIDIROUTER_MODULE_SEPARATOR", defaults.module_separator),
            namespace_separator: env_string(
                "BIDIROUTER_NAMESPACE_SEPARATOR",
                defaults.namespace_separator,
            ),
            namespace_controller: env_string(
                "BIDIROUTER_NAMESPACE_CONTROLLER",
                defaults.namespace_controller,
            ),
        }
    }

    /// Parse configuration from a YAML document; missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or an empty module separator.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("invalid router configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or [`from_yaml_str`](Self::from_yaml_str) fails.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read router config {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("failed to load router config {}", path.display()))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.module_separator.is_empty() {
            bail!("module_separator must not be empty");
        }
        Ok(())
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => match val.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

fn env_string(name: &str, default: String) -> String {
    env::var(name)
        .ok()
        .filter(|val| !val.is_empty())
        .unwrap_or(default)
}
