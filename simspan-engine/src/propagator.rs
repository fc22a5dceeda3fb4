//! Span propagator
//!
//! One pass over a document runs in two phases. Discovery reads the current
//! annotation snapshot: it collects the source annotations, builds a literal
//! pattern from each one's covered text and scans the target annotations.
//! Commit then adds the surviving candidates as new source-type annotations.
//! Annotations created by a pass are never scanned by that same pass.

use crate::{
    collector::SourceIndex,
    config::PropagatorConfig,
    error::Result,
    merger::{self, DedupMerger},
    pattern::{PatternOptions, SpanPattern},
    scanner::{CandidateScanner, MatchCandidate, ScanStats},
};
use simspan_core::{Annotation, Document, TypeHandle};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Outcome of the read-only discovery phase
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Resolved source type
    pub source_type: TypeHandle,
    /// Source annotations in the snapshot
    pub source_count: usize,
    /// Target annotations in the snapshot
    pub target_count: usize,
    /// Scan counters summed over all sources
    pub stats: ScanStats,
    /// Matches dropped because a source annotation already exists there
    pub suppressed: usize,
    /// Distinct new spans in offset order
    pub candidates: Vec<MatchCandidate>,
}

/// Summary of one document pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Source annotations the patterns were built from
    pub source_annotations: usize,
    /// Target annotations in the scan snapshot
    pub target_annotations: usize,
    /// Source/target pairs whose text was searched
    pub scanned_pairs: usize,
    /// Source/target pairs skipped by the shared-boundary rule
    pub excluded_pairs: usize,
    /// Raw matches before deduplication
    pub matches: usize,
    /// Matches that coincided with an existing source annotation
    pub suppressed_existing: usize,
    /// Annotations added to the document
    pub created: Vec<Annotation>,
}

impl PropagationReport {
    /// Number of annotations added
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Propagates source-type spans to identical text inside target-type spans
#[derive(Debug, Clone)]
pub struct SpanPropagator {
    config: PropagatorConfig,
}

impl SpanPropagator {
    /// Create a propagator from a validated configuration
    pub fn new(config: PropagatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a propagator from TOML configuration
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Self::new(PropagatorConfig::from_toml_str(toml_str)?)
    }

    /// The active configuration
    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    /// Run discovery without touching the document
    ///
    /// Fails before any scanning if either configured type is undeclared or
    /// the source type cannot be instantiated.
    pub fn discover(&self, doc: &Document) -> Result<Discovery> {
        let source_type = doc.resolve_type(&self.config.source_type)?;
        let target_type = doc.resolve_type(&self.config.target_type)?;
        doc.type_system().constructor(source_type)?;

        let sources = SourceIndex::collect(doc, source_type);
        let scanner = CandidateScanner::new(doc, doc.annotations_of(target_type).copied().collect());
        log::debug!(
            "discovery: {} {} sources, {} {} targets",
            sources.len(),
            self.config.source_type,
            scanner.target_count(),
            self.config.target_type
        );

        let options = PatternOptions::from(&self.config);
        let mut patterns: HashMap<&str, Option<SpanPattern>> = HashMap::new();
        let mut merger = DedupMerger::new(&sources);
        let mut stats = ScanStats::default();

        for source in sources.annotations() {
            let text = doc.covered_text(source);
            let pattern = match patterns.entry(text) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(SpanPattern::build(text, options)?),
            };
            let Some(pattern) = pattern else {
                continue;
            };
            stats.absorb(scanner.scan(source, pattern, |candidate| merger.offer(candidate)));
        }

        let suppressed = merger.suppressed();
        let candidates = merger.into_candidates();
        log::debug!(
            "discovery: {} matches, {} already annotated, {} new spans",
            stats.matches,
            suppressed,
            candidates.len()
        );

        Ok(Discovery {
            source_type,
            source_count: sources.len(),
            target_count: scanner.target_count(),
            stats,
            suppressed,
            candidates,
        })
    }

    /// Run a full discovery and commit pass over one document
    pub fn process(&self, doc: &mut Document) -> Result<PropagationReport> {
        let discovery = self.discover(doc)?;
        let created = merger::commit(doc, discovery.source_type, &discovery.candidates)?;
        log::info!(
            "created {} {} annotations",
            created.len(),
            self.config.source_type
        );

        Ok(PropagationReport {
            source_annotations: discovery.source_count,
            target_annotations: discovery.target_count,
            scanned_pairs: discovery.stats.scanned,
            excluded_pairs: discovery.stats.excluded,
            matches: discovery.stats.matches,
            suppressed_existing: discovery.suppressed,
            created,
        })
    }

    /// Process independent documents, one result per document
    #[cfg(feature = "parallel")]
    pub fn process_batch(&self, docs: &mut [Document]) -> Vec<Result<PropagationReport>> {
        use rayon::prelude::*;

        docs.par_iter_mut().map(|doc| self.process(doc)).collect()
    }

    /// Process independent documents, one result per document
    #[cfg(not(feature = "parallel"))]
    pub fn process_batch(&self, docs: &mut [Document]) -> Vec<Result<PropagationReport>> {
        docs.iter_mut().map(|doc| self.process(doc)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropagationError;
    use simspan_core::TypeSystem;
    use std::sync::Arc;

    fn propagator(word_boundaries: bool, case_sensitive: bool) -> SpanPropagator {
        SpanPropagator::new(
            PropagatorConfig::builder()
                .source_type("Gene")
                .target_type("Sentence")
                .respect_word_boundaries(word_boundaries)
                .case_sensitive(case_sensitive)
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    fn types() -> Arc<TypeSystem> {
        Arc::new(
            TypeSystem::builder()
                .declare("Gene")
                .declare("Sentence")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_report_counts() {
        let mut doc = Document::new("BRCA1 is mutated. BRCA1 and BRCA1 again.", types());
        doc.annotate("Sentence", 0, 17).unwrap();
        doc.annotate("Sentence", 18, 40).unwrap();
        doc.annotate("Gene", 0, 5).unwrap();

        let report = propagator(true, true).process(&mut doc).unwrap();

        assert_eq!(report.source_annotations, 1);
        assert_eq!(report.target_annotations, 2);
        assert_eq!(report.excluded_pairs, 1);
        assert_eq!(report.scanned_pairs, 1);
        assert_eq!(report.matches, 2);
        assert_eq!(report.suppressed_existing, 0);
        let spans: Vec<(usize, usize)> = report
            .created
            .iter()
            .map(|a| (a.begin(), a.end()))
            .collect();
        assert_eq!(spans, vec![(18, 23), (28, 33)]);
    }

    #[test]
    fn test_discover_does_not_mutate() {
        let mut doc = Document::new("ab. ab.", types());
        doc.annotate("Sentence", 4, 7).unwrap();
        doc.annotate("Gene", 0, 2).unwrap();

        let discovery = propagator(false, true).discover(&doc).unwrap();
        assert_eq!(discovery.candidates, vec![MatchCandidate { begin: 4, end: 6 }]);
        assert_eq!(doc.annotations().len(), 2);
    }

    #[test]
    fn test_unknown_target_type() {
        let mut doc = Document::new("text", types());
        let p = SpanPropagator::new(
            PropagatorConfig::builder()
                .source_type("Gene")
                .target_type("Paragraph")
                .respect_word_boundaries(false)
                .case_sensitive(false)
                .build()
                .unwrap(),
        )
        .unwrap();

        let err = p.process(&mut doc).unwrap_err();
        assert!(matches!(err, PropagationError::Configuration { ref name } if name == "Paragraph"));
    }

    #[test]
    fn test_zero_length_source_yields_nothing() {
        let mut doc = Document::new("abc abc", types());
        doc.annotate("Sentence", 0, 7).unwrap();
        doc.annotate("Gene", 2, 2).unwrap();

        let report = propagator(false, true).process(&mut doc).unwrap();
        assert_eq!(report.matches, 0);
        assert!(report.created.is_empty());
    }

    #[test]
    fn test_from_toml() {
        let p = SpanPropagator::from_toml_str(
            "SourceType = \"Gene\"\nTargetType = \"Sentence\"\nRespectWordBoundaries = false\nCaseSensitive = true\n",
        )
        .unwrap();
        assert_eq!(p.config().target_type, "Sentence");
    }
}
