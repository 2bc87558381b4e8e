//! Plain text output formatter

use super::{LineRecord, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - writes lines back byte for byte
pub struct TextFormatter<W: Write> {
    writer: W,
    number_lines: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, number_lines: bool) -> Self {
        Self {
            writer,
            number_lines,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_line(&mut self, record: &LineRecord<'_>) -> Result<()> {
        if self.number_lines {
            write!(self.writer, "{}:{}:", record.source, record.number)?;
        }
        self.writer.write_all(record.line.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
