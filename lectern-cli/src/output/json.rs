//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use lectern_core::NerOutput;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Document {
    source: String,
    entities: Vec<EntityRecord>,
    token_count: usize,
}

#[derive(Serialize)]
struct EntityRecord {
    label: String,
    text: String,
    start: usize,
    end: usize,
}

/// JSON formatter - collects all documents and writes a single array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<Document>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, source: &str, output: &NerOutput) -> Result<()> {
        let entities = output
            .tree
            .entities()
            .map(|entity| EntityRecord {
                label: entity.label.code().to_string(),
                text: entity.text(),
                start: entity.start(),
                end: entity.end(),
            })
            .collect();

        self.documents.push(Document {
            source: source.to_string(),
            entities,
            token_count: output.metadata.token_count,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
