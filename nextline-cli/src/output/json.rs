//! JSON output formatter

use super::{LineRecord, OutputFormatter};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - writes one JSON object per line (JSON Lines)
pub struct JsonFormatter<W: Write> {
    writer: W,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LineData {
    /// Input the line came from
    pub source: String,
    /// Raw descriptor number
    pub descriptor: i32,
    /// 1-based line number within the input
    pub number: usize,
    /// Line content without its newline (invalid UTF-8 replaced)
    pub text: String,
    /// Whether the line ended with a newline
    pub terminated: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_line(&mut self, record: &LineRecord<'_>) -> Result<()> {
        let data = LineData {
            source: record.source.to_string(),
            descriptor: record.descriptor.as_raw(),
            number: record.number,
            text: String::from_utf8_lossy(record.line.content()).into_owned(),
            terminated: record.line.has_newline(),
        };
        serde_json::to_writer(&mut self.writer, &data)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
