//! Mason configuration file handling

use anyhow::{Context, Result};
use mason_layout::{LayoutConfig, PartialLayoutConfig, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "mason.toml";

/// Top-level configuration (mason.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MasonConfig {
    /// Item file used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<PathBuf>,
    #[serde(default)]
    pub layout: PartialLayoutConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Simulated viewport
#[derive(Debug, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl From<&ViewportConfig> for Viewport {
    fn from(config: &ViewportConfig) -> Self {
        Viewport::new(config.width, config.height)
    }
}

impl MasonConfig {
    /// Load `path`, or `mason.toml` in the working directory when no path is
    /// given. A missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) if path.is_dir() => path.join(CONFIG_FILE),
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No config found at {}. Run `mason init` to create one.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: MasonConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Configuration with every layout option spelled out
    pub fn with_defaults() -> Self {
        Self {
            items: Some(PathBuf::from("items.json")),
            layout: LayoutConfig::default().into(),
            viewport: ViewportConfig::default(),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
