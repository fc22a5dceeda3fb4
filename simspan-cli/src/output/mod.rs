//! Output writing module

use crate::input::DocumentFile;
use anyhow::Result;
use std::path::Path;

/// Destination for processed documents
pub trait DocumentSink {
    /// Write one processed document read from `source`
    fn write_document(&mut self, source: &Path, document: &DocumentFile) -> Result<()>;

    /// Flush any buffered output
    fn finish(&mut self) -> Result<()>;
}

pub mod directory;
pub mod json;

pub use directory::DirectorySink;
pub use json::JsonSink;
