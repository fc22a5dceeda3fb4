//! Source collection
//!
//! Snapshots the existing source-type annotations of a document and indexes
//! them by offset key.

use simspan_core::{Annotation, Document, OffsetKey, TypeHandle};
use std::collections::HashSet;

/// Existing source-type annotations of one document
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    annotations: Vec<Annotation>,
    keys: HashSet<OffsetKey>,
}

impl SourceIndex {
    /// Snapshot every annotation of `source_type` (subtypes included)
    pub fn collect(doc: &Document, source_type: TypeHandle) -> Self {
        let annotations: Vec<Annotation> = doc.annotations_of(source_type).copied().collect();
        let keys = annotations.iter().map(Annotation::key).collect();
        Self { annotations, keys }
    }

    /// Source annotations in index order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether a source annotation already occupies `key`
    pub fn contains(&self, key: &OffsetKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of source annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether there are no source annotations
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
