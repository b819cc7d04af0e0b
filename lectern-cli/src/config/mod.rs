//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use lectern_core::IiifConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Entity extraction configuration
    #[serde(default)]
    pub ner: NerSection,

    /// IIIF endpoint configuration
    #[serde(default)]
    pub iiif: IiifSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

impl CliConfig {
    /// Load configuration from a TOML file, or the defaults when no path
    /// is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
                toml::from_str(&content)
                    .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))
                    .context("Failed to load configuration")
            }
            None => Ok(Self::default()),
        }
    }
}

/// Entity-extraction-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct NerSection {
    /// Language code for the pipeline
    pub language: String,

    /// Additional gazetteer entries treated as GPEs
    pub extra_gpe: Vec<String>,
}

impl Default for NerSection {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            extra_gpe: Vec::new(),
        }
    }
}

/// IIIF-endpoint-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct IiifSection {
    /// URL scheme
    pub scheme: String,

    /// Server host name
    pub host: String,

    /// Presentation API path prefix
    pub presentation_prefix: String,

    /// Image API path prefix
    pub image_prefix: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IiifSection {
    fn default() -> Self {
        let core = IiifConfig::default();
        Self {
            scheme: core.scheme,
            host: core.host,
            presentation_prefix: core.presentation_prefix,
            image_prefix: core.image_prefix,
            timeout_secs: core.timeout_secs,
        }
    }
}

impl IiifSection {
    /// Convert to the core endpoint configuration
    pub fn to_core(&self) -> IiifConfig {
        IiifConfig {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            presentation_prefix: self.presentation_prefix.clone(),
            image_prefix: self.image_prefix.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSection {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}
