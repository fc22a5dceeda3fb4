//! Annotations and offset keys

use crate::type_system::TypeHandle;
use std::cmp::Ordering;
use std::fmt;

/// A typed span over document text
///
/// Offsets are byte offsets into the UTF-8 document text, `begin` inclusive
/// and `end` exclusive. They cannot be changed once the annotation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Annotation {
    type_handle: TypeHandle,
    begin: usize,
    end: usize,
}

impl Annotation {
    /// Create an annotation value
    ///
    /// Offsets are not checked here; [`crate::Document::create_annotation`]
    /// validates them against the text before any constructor runs.
    pub fn new(type_handle: TypeHandle, begin: usize, end: usize) -> Self {
        Self {
            type_handle,
            begin,
            end,
        }
    }

    /// The declared type of this annotation
    pub fn type_handle(&self) -> TypeHandle {
        self.type_handle
    }

    /// Inclusive begin offset
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.end
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the span covers no text
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The `(begin, end)` identity of this span
    pub fn key(&self) -> OffsetKey {
        OffsetKey::new(self.begin, self.end)
    }
}

/// Natural index order: begin ascending, longer spans first, then type
impl Ord for Annotation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.end.cmp(&self.end))
            .then_with(|| self.type_handle.cmp(&other.type_handle))
    }
}

impl PartialOrd for Annotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `(begin, end)` pair used as a deduplication identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OffsetKey {
    /// Inclusive begin offset
    pub begin: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl OffsetKey {
    /// Create a key from raw offsets
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }
}

impl From<&Annotation> for OffsetKey {
    fn from(annotation: &Annotation) -> Self {
        annotation.key()
    }
}

impl fmt::Display for OffsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(id: u32) -> TypeHandle {
        TypeHandle::from_index(id as usize)
    }

    #[test]
    fn test_index_order() {
        let mut annotations = vec![
            Annotation::new(handle(0), 5, 7),
            Annotation::new(handle(0), 0, 3),
            Annotation::new(handle(1), 0, 10),
            Annotation::new(handle(0), 0, 10),
        ];
        annotations.sort();

        assert_eq!(
            annotations,
            vec![
                Annotation::new(handle(0), 0, 10),
                Annotation::new(handle(1), 0, 10),
                Annotation::new(handle(0), 0, 3),
                Annotation::new(handle(0), 5, 7),
            ]
        );
    }

    #[test]
    fn test_offset_key() {
        let annotation = Annotation::new(handle(2), 4, 9);
        assert_eq!(annotation.key(), OffsetKey::new(4, 9));
        assert_eq!(OffsetKey::from(&annotation).to_string(), "4-9");
        assert_eq!(annotation.len(), 5);
        assert!(!annotation.is_empty());
        assert!(Annotation::new(handle(2), 3, 3).is_empty());
    }
}
