//! Deduplicating merge and commit
//!
//! Candidates that coincide with an existing source-type annotation are
//! dropped; the rest collapse by offset key. Committing is the only step of
//! a pass that mutates the document.

use crate::collector::SourceIndex;
use crate::error::Result;
use crate::scanner::MatchCandidate;
use simspan_core::{Annotation, Document, OffsetKey, TypeHandle};
use std::collections::BTreeMap;

/// Accumulates candidates across all source patterns of a pass
#[derive(Debug)]
pub struct DedupMerger<'s> {
    existing: &'s SourceIndex,
    pending: BTreeMap<OffsetKey, MatchCandidate>,
    suppressed: usize,
}

impl<'s> DedupMerger<'s> {
    /// Create a merger against the snapshot of existing source annotations
    pub fn new(existing: &'s SourceIndex) -> Self {
        Self {
            existing,
            pending: BTreeMap::new(),
            suppressed: 0,
        }
    }

    /// Offer one candidate
    pub fn offer(&mut self, candidate: MatchCandidate) {
        let key = candidate.key();
        if self.existing.contains(&key) {
            self.suppressed += 1;
        } else {
            self.pending.insert(key, candidate);
        }
    }

    /// Candidates dropped because a source annotation already covers them
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Distinct candidates waiting to be committed
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting to be committed
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Surviving candidates in offset order
    pub fn into_candidates(self) -> Vec<MatchCandidate> {
        self.pending.into_values().collect()
    }
}

/// Create and index one annotation of `source_type` per candidate
///
/// Every annotation is constructed before the first one is added, so a
/// construction failure leaves the document untouched.
pub fn commit(
    doc: &mut Document,
    source_type: TypeHandle,
    candidates: &[MatchCandidate],
) -> Result<Vec<Annotation>> {
    let created = candidates
        .iter()
        .map(|c| doc.create_annotation(source_type, c.begin, c.end))
        .collect::<simspan_core::Result<Vec<_>>>()?;

    doc.add_annotations(created.iter().copied())?;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropagationError;
    use simspan_core::TypeSystem;
    use std::sync::Arc;

    fn candidate(begin: usize, end: usize) -> MatchCandidate {
        MatchCandidate { begin, end }
    }

    #[test]
    fn test_existing_keys_suppressed_and_duplicates_collapse() {
        let ts = TypeSystem::builder().declare("Gene").build().unwrap();
        let mut doc = Document::new("p53 and p53 and p53", Arc::new(ts));
        doc.annotate("Gene", 0, 3).unwrap();
        let gene = doc.resolve_type("Gene").unwrap();
        let index = SourceIndex::collect(&doc, gene);

        let mut merger = DedupMerger::new(&index);
        merger.offer(candidate(16, 19));
        merger.offer(candidate(0, 3));
        merger.offer(candidate(8, 11));
        merger.offer(candidate(8, 11));

        assert_eq!(merger.suppressed(), 1);
        assert_eq!(merger.len(), 2);
        assert_eq!(
            merger.into_candidates(),
            vec![candidate(8, 11), candidate(16, 19)]
        );
    }

    #[test]
    fn test_commit_adds_annotations() {
        let ts = TypeSystem::builder().declare("Gene").build().unwrap();
        let mut doc = Document::new("p53 and p53", Arc::new(ts));
        let gene = doc.resolve_type("Gene").unwrap();

        let created = commit(&mut doc, gene, &[candidate(8, 11), candidate(0, 3)]).unwrap();
        assert_eq!(created.len(), 2);
        let spans: Vec<(usize, usize)> = doc
            .annotations_of(gene)
            .map(|a| (a.begin(), a.end()))
            .collect();
        assert_eq!(spans, vec![(0, 3), (8, 11)]);
    }

    #[test]
    fn test_failed_construction_commits_nothing() {
        let ts = TypeSystem::builder()
            .declare("Gene")
            .constructor("Gene", |ty, begin, end| {
                if begin == 0 {
                    Ok(Annotation::new(ty, begin, end))
                } else {
                    Err("only leading genes".to_string())
                }
            })
            .build()
            .unwrap();
        let mut doc = Document::new("p53 and p53", Arc::new(ts));
        let gene = doc.resolve_type("Gene").unwrap();

        let result = commit(&mut doc, gene, &[candidate(0, 3), candidate(8, 11)]);
        assert!(matches!(
            result,
            Err(PropagationError::AnnotationConstruction { ref name, .. }) if name == "Gene"
        ));
        assert!(doc.annotations().is_empty());
    }
}
