//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use lectern_core::NerOutput;
use std::io::Write;

/// Text formatter - one entity per line as `LABEL<TAB>text`
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, source: &str, output: &NerOutput) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        if source != "-" {
            writeln!(self.writer, "# {source}")?;
        }
        for entity in output.tree.entities() {
            writeln!(self.writer, "{}\t{}", entity.label, entity.text())?;
        }
        self.documents += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
