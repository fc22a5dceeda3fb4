//! Per-file output into a directory

use super::DocumentSink;
use crate::input::DocumentFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each document to `<dir>/<source file name>`
pub struct DirectorySink {
    dir: PathBuf,
    written: usize,
}

impl DirectorySink {
    /// Create the sink, creating the directory if needed
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: 0,
        })
    }
}

impl DocumentSink for DirectorySink {
    fn write_document(&mut self, source: &Path, document: &DocumentFile) -> Result<()> {
        let file_name = source
            .file_name()
            .with_context(|| format!("Input path has no file name: {}", source.display()))?;
        let target = self.dir.join(file_name);

        let json = serde_json::to_string_pretty(document)?;
        fs::write(&target, json + "\n")
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::info!("Wrote {} documents to {}", self.written, self.dir.display());
        Ok(())
    }
}
