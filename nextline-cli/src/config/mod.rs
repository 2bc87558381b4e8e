//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use nextline_core::ReaderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Line reader configuration
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Prefix every line with its source and line number
    pub number_lines: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            number_lines: false,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config
            .reader
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Commented configuration file holding the defaults
    pub fn template() -> String {
        let defaults = CliConfig::default();
        format!(
            r#"# nextline configuration

[reader]
# Bytes requested from the input per read call.
# Zero or a negative value disables reading entirely.
chunk_size = {chunk_size}

# Descriptors at or above this number are ignored.
# Leave unset for no limit.
# max_descriptors = {max_descriptors}

[output]
# "text" or "json"
format = "{format}"

# Prefix each line with <source>:<line-number>:
number_lines = {number_lines}
"#,
            chunk_size = defaults.reader.chunk_size,
            max_descriptors = nextline_core::defaults::MAX_DESCRIPTORS,
            format = defaults.output.format.as_str(),
            number_lines = defaults.output.number_lines,
        )
    }
}
