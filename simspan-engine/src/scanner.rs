//! Candidate scanning
//!
//! For one source annotation, scans the covered text of every target
//! annotation for matches of the source pattern and reports each match in
//! absolute document offsets.

use crate::pattern::SpanPattern;
use simspan_core::{Annotation, Document, OffsetKey};

/// A proposed new source-type span in absolute offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchCandidate {
    /// Inclusive begin offset
    pub begin: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl MatchCandidate {
    /// Deduplication key of the candidate
    pub fn key(&self) -> OffsetKey {
        OffsetKey::new(self.begin, self.end)
    }
}

/// Whether `target` is skipped when scanning for `source`
///
/// A target sharing its begin or its end offset with the source is not
/// scanned.
pub fn is_excluded(source: &Annotation, target: &Annotation) -> bool {
    target.begin() == source.begin() || target.end() == source.end()
}

/// Counters for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Targets whose text was searched
    pub scanned: usize,
    /// Targets skipped by the exclusion rule
    pub excluded: usize,
    /// Matches reported
    pub matches: usize,
}

impl ScanStats {
    /// Accumulate another scan's counters
    pub fn absorb(&mut self, other: ScanStats) {
        self.scanned += other.scanned;
        self.excluded += other.excluded;
        self.matches += other.matches;
    }
}

/// Scanner over a fixed snapshot of target annotations
#[derive(Debug)]
pub struct CandidateScanner<'d> {
    doc: &'d Document,
    targets: Vec<Annotation>,
}

impl<'d> CandidateScanner<'d> {
    /// Snapshot the targets before scanning begins
    pub fn new(doc: &'d Document, targets: Vec<Annotation>) -> Self {
        Self { doc, targets }
    }

    /// Number of target annotations in the snapshot
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Scan every eligible target for `pattern`, emitting each match
    pub fn scan<F>(&self, source: &Annotation, pattern: &SpanPattern, mut emit: F) -> ScanStats
    where
        F: FnMut(MatchCandidate),
    {
        let mut stats = ScanStats::default();

        for target in &self.targets {
            if is_excluded(source, target) {
                stats.excluded += 1;
                continue;
            }
            stats.scanned += 1;

            let offset = target.begin();
            for (start, end) in pattern.find_iter(self.doc.covered_text(target)) {
                log::trace!(
                    "match {}..{} in target {}..{}",
                    offset + start,
                    offset + end,
                    target.begin(),
                    target.end()
                );
                stats.matches += 1;
                emit(MatchCandidate {
                    begin: offset + start,
                    end: offset + end,
                });
            }
        }

        stats
    }
}
