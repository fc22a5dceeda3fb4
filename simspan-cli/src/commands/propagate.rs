//! Propagate command implementation

use super::init_logging;
use crate::config::{self, FileConfig};
use crate::error::CliError;
use crate::input::{resolve_patterns, DocumentFile};
use crate::output::{DirectorySink, DocumentSink, JsonSink};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use simspan_core::{Document, TypeSystem};
use simspan_engine::SpanPropagator;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the propagate command
#[derive(Debug, Args)]
pub struct PropagateArgs {
    /// Input JSON documents or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output directory (default: stdout)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Propagator configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Type system definition (TOML); types are inferred from the inputs if omitted
    #[arg(long, value_name = "FILE")]
    pub types: Option<PathBuf>,

    /// Source annotation type (overrides SourceType)
    #[arg(long, value_name = "TYPE")]
    pub source_type: Option<String>,

    /// Target annotation type (overrides TargetType)
    #[arg(long, value_name = "TYPE")]
    pub target_type: Option<String>,

    /// Require word boundaries around matches (overrides RespectWordBoundaries)
    #[arg(long, value_name = "BOOL")]
    pub word_boundaries: Option<bool>,

    /// Match letter case exactly (overrides CaseSensitive)
    #[arg(long, value_name = "BOOL")]
    pub case_sensitive: Option<bool>,

    /// Write one compact JSON document per line
    #[arg(long)]
    pub compact: bool,

    /// Worker threads (default: number of CPUs)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl PropagateArgs {
    /// Execute the propagate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting span propagation");
        log::debug!("Arguments: {:?}", self);

        let config = config::resolve(self.config.as_deref(), self.overrides())?;
        let propagator = SpanPropagator::new(config)?;
        let files = resolve_patterns(&self.input)?;
        let mut docs = self.load_documents(&files)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or_else(num_cpus::get))
            .build()
            .context("Failed to start worker threads")?;
        let results = pool.install(|| propagator.process_batch(&mut docs));

        let mut sink: Box<dyn DocumentSink> = match &self.output {
            Some(dir) => Box::new(DirectorySink::new(dir)?),
            None => Box::new(JsonSink::new(std::io::stdout().lock(), !self.compact)),
        };

        let mut created = 0;
        let mut failures = Vec::new();
        for ((path, doc), result) in files.iter().zip(&docs).zip(results) {
            match result {
                Ok(report) => {
                    log::info!(
                        "{}: {} matches, {} already annotated, {} added",
                        path.display(),
                        report.matches,
                        report.suppressed_existing,
                        report.created_count()
                    );
                    created += report.created_count();
                    sink.write_document(path, &DocumentFile::from_document(doc))?;
                }
                Err(e) => {
                    log::error!("{}: {e}", path.display());
                    failures.push(format!("{}: {e}", path.display()));
                }
            }
            progress.file_completed(&path.display().to_string());
        }

        sink.finish()?;
        progress.finish(created);

        if !failures.is_empty() {
            return Err(CliError::ProcessingError(format!(
                "{} of {} documents failed: {}",
                failures.len(),
                files.len(),
                failures.join("; ")
            ))
            .into());
        }
        Ok(())
    }

    fn overrides(&self) -> FileConfig {
        FileConfig {
            source_type: self.source_type.clone(),
            target_type: self.target_type.clone(),
            respect_word_boundaries: self.word_boundaries,
            case_sensitive: self.case_sensitive,
        }
    }

    fn load_documents(&self, files: &[PathBuf]) -> Result<Vec<Document>> {
        let parsed = files
            .iter()
            .map(|path| DocumentFile::read(path))
            .collect::<Result<Vec<_>>>()?;

        let type_system = match &self.types {
            Some(path) => TypeSystem::from_file(path)
                .with_context(|| format!("Failed to load type system: {}", path.display()))?,
            None => DocumentFile::implicit_type_system(&parsed)?,
        };
        let type_system = Arc::new(type_system);

        files
            .iter()
            .zip(parsed)
            .map(|(path, file)| {
                file.into_document(Arc::clone(&type_system))
                    .with_context(|| format!("Failed to load document: {}", path.display()))
            })
            .collect()
    }
}
