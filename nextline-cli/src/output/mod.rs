//! Output formatting module

use anyhow::Result;
use nextline_core::{Descriptor, Line};
use serde::{Deserialize, Serialize};

/// One line together with where it came from
#[derive(Debug, Clone, Copy)]
pub struct LineRecord<'a> {
    /// Display name of the input (path, or `-` for stdin)
    pub source: &'a str,
    /// Descriptor the line was read from
    pub descriptor: Descriptor,
    /// 1-based line number within its input
    pub number: usize,
    /// The line itself
    pub line: &'a Line,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single line
    fn format_line(&mut self, record: &LineRecord<'_>) -> Result<()>;

    /// Finalize output
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lines written back verbatim
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    /// Name as written in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
