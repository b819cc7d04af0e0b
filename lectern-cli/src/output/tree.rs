//! Tree output formatter

use super::OutputFormatter;
use anyhow::Result;
use lectern_core::NerOutput;
use std::io::Write;

/// Tree formatter - bracketed parse line followed by an ASCII tree
pub struct TreeFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TreeFormatter<W> {
    /// Create a new tree formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TreeFormatter<W> {
    fn format_document(&mut self, source: &str, output: &NerOutput) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        if source != "-" {
            writeln!(self.writer, "# {source}")?;
        }
        writeln!(self.writer, "{}", output.tree.bracketed())?;
        writeln!(self.writer)?;
        write!(self.writer, "{}", output.tree.render_ascii())?;
        self.documents += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
