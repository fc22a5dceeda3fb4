//! JSON stream output

use super::DocumentSink;
use crate::input::DocumentFile;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Writes documents to a stream, pretty-printed or one per line
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    /// Create a new JSON sink
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }
}

impl<W: Write> DocumentSink for JsonSink<W> {
    fn write_document(&mut self, _source: &Path, document: &DocumentFile) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, document)?;
        } else {
            serde_json::to_writer(&mut self.writer, document)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
